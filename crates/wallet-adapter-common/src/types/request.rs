use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::outcome::WalletResponse;

/// Wallets the hosted widget can route a request to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletId {
    Near,
    Here,
    Meteor,
}

impl WalletId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Near => "near",
            Self::Here => "here",
            Self::Meteor => "meteor",
        }
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gas or deposit amount. Large yocto amounts travel as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(serde_json::Number),
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// One action inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<Amount>,
}

impl WalletAction {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: None,
            gas: None,
            deposit: None,
        }
    }

    pub fn with_args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }

    pub fn with_gas(mut self, gas: impl Into<Amount>) -> Self {
        self.gas = Some(gas.into());
        self
    }

    pub fn with_deposit(mut self, deposit: impl Into<Amount>) -> Self {
        self.deposit = Some(deposit.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// `mainnet` or `testnet`.
    pub network_id: String,
    /// Contract the access key is requested for.
    pub contract_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletId>,
}

impl SignInRequest {
    pub fn new(network_id: impl Into<String>, contract_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            contract_id: contract_id.into(),
            wallet: None,
        }
    }

    pub fn with_wallet(mut self, wallet: WalletId) -> Self {
        self.wallet = Some(wallet);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub receiver_id: String,
    pub actions: Vec<WalletAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletId>,
}

impl TransactionRequest {
    pub fn new(receiver_id: impl Into<String>, actions: Vec<WalletAction>) -> Self {
        Self {
            receiver_id: receiver_id.into(),
            actions,
            wallet: None,
        }
    }

    pub fn with_wallet(mut self, wallet: WalletId) -> Self {
        self.wallet = Some(wallet);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    /// Where to redirect when the wallet needs a full page flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WalletResponse for SignInResult {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WalletResponse for TransactionResult {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
