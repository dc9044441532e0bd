use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// The adapter's view of the wallet session.
///
/// Keys the adapter does not know about are kept in `extra` so that a
/// snapshot sent back to the widget carries everything the widget stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_wallet_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A state fragment pushed by the widget.
///
/// Known keys are tri-state: absent (`None`), explicit `null`
/// (`Some(None)`), or a value. A known key holding anything other than a
/// string or `null` is dropped; the rest of the fragment still applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub account_id: Option<Option<String>>,
    pub public_key: Option<Option<String>>,
    pub private_key: Option<Option<String>>,
    pub last_wallet_id: Option<Option<String>>,
    pub extra: Map<String, Value>,
}

impl StateUpdate {
    pub fn from_fragment(fragment: Map<String, Value>) -> Self {
        let mut update = Self::default();
        for (key, value) in fragment {
            let slot = match key.as_str() {
                "accountId" => &mut update.account_id,
                "publicKey" => &mut update.public_key,
                "privateKey" => &mut update.private_key,
                "lastWalletId" => &mut update.last_wallet_id,
                _ => {
                    update.extra.insert(key, value);
                    continue;
                }
            };
            match value {
                Value::Null => *slot = Some(None),
                Value::String(text) => *slot = Some(Some(text)),
                other => warn!(key = %key, value = %other, "dropping state key with non-string value"),
            }
        }
        update
    }
}

impl<'de> Deserialize<'de> for StateUpdate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(Self::from_fragment)
    }
}

impl WalletState {
    /// Shallow merge: keys present in `update` overwrite, all others are kept.
    pub fn merge(&mut self, update: &StateUpdate) {
        overwrite(&mut self.account_id, &update.account_id);
        overwrite(&mut self.public_key, &update.public_key);
        overwrite(&mut self.private_key, &update.private_key);
        overwrite(&mut self.last_wallet_id, &update.last_wallet_id);
        for (key, value) in &update.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

fn overwrite(slot: &mut Option<String>, update: &Option<Option<String>>) {
    if let Some(value) = update {
        *slot = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(value: Value) -> StateUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn default_state_is_empty_object() {
        let state = WalletState::default();
        assert_eq!(state.account_id, None);
        assert_eq!(state.to_value(), json!({}));
    }

    #[test]
    fn merge_overwrites_present_keys_only() {
        let mut state = WalletState {
            account_id: Some("alice.near".into()),
            public_key: Some("ed25519:abc".into()),
            ..Default::default()
        };
        state.merge(&update(json!({ "accountId": "bob.near" })));
        assert_eq!(state.account_id.as_deref(), Some("bob.near"));
        assert_eq!(state.public_key.as_deref(), Some("ed25519:abc"));
    }

    #[test]
    fn explicit_null_clears_key() {
        let mut state = WalletState {
            account_id: Some("alice.near".into()),
            last_wallet_id: Some("here".into()),
            ..Default::default()
        };
        state.merge(&update(json!({ "accountId": null })));
        assert_eq!(state.account_id, None);
        assert_eq!(state.last_wallet_id.as_deref(), Some("here"));
    }

    #[test]
    fn unknown_keys_are_kept_and_replaced_shallowly() {
        let mut state = WalletState::default();
        state.merge(&update(json!({ "network": { "id": "testnet", "rpc": "x" } })));
        state.merge(&update(json!({ "network": { "id": "mainnet" } })));
        assert_eq!(state.extra["network"], json!({ "id": "mainnet" }));
        assert_eq!(state.to_value(), json!({ "network": { "id": "mainnet" } }));
    }

    #[test]
    fn absent_keys_are_untouched() {
        let update = update(json!({ "privateKey": null }));
        assert_eq!(update.private_key, Some(None));
        assert_eq!(update.account_id, None);
        assert!(update.extra.is_empty());
    }

    #[test]
    fn wrongly_typed_key_is_dropped_alone() {
        let mut state = WalletState {
            public_key: Some("ed25519:abc".into()),
            ..Default::default()
        };
        let update = update(json!({ "accountId": "a.near", "publicKey": 7 }));
        assert_eq!(update.public_key, None);
        assert!(update.extra.is_empty());

        state.merge(&update);
        assert_eq!(state.account_id.as_deref(), Some("a.near"));
        assert_eq!(state.public_key.as_deref(), Some("ed25519:abc"));
    }

    #[test]
    fn non_object_fragment_is_rejected() {
        assert!(serde_json::from_value::<StateUpdate>(json!("signed-in")).is_err());
        assert!(serde_json::from_value::<StateUpdate>(json!([1, 2])).is_err());
    }

    #[test]
    fn state_serializes_camel_case() {
        let state = WalletState {
            account_id: Some("alice.near".into()),
            last_wallet_id: Some("meteor".into()),
            ..Default::default()
        };
        assert_eq!(
            state.to_value(),
            json!({ "accountId": "alice.near", "lastWalletId": "meteor" })
        );
    }
}
