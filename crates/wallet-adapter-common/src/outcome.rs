//! Settlement of a single wallet exchange.
//!
//! Every exchange ends in exactly one of three ways: the widget answered,
//! the widget answered with an `error` field, or the exchange was abandoned
//! before any answer arrived.

use std::fmt;

use crate::errors::AdapterError;

/// Why an exchange ended without a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// The widget frame sent a `close` action (the user dismissed it).
    ClosedByUser,
    /// A newer request evicted this exchange's frame.
    Superseded,
    /// The adapter was torn down while the exchange was in flight.
    Destroyed,
}

impl fmt::Display for AbandonReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosedByUser => write!(f, "closed by user"),
            Self::Superseded => write!(f, "superseded by a newer request"),
            Self::Destroyed => write!(f, "adapter destroyed"),
        }
    }
}

/// A response type that may carry a wallet-reported error.
pub trait WalletResponse {
    fn error(&self) -> Option<&str>;
}

impl WalletResponse for serde_json::Value {
    fn error(&self) -> Option<&str> {
        self.get("error").and_then(serde_json::Value::as_str)
    }
}

/// Result of one request/response exchange with the wallet widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Resolved(T),
    Failed { error: String, response: T },
    Abandoned(AbandonReason),
}

impl<T: WalletResponse> Outcome<T> {
    /// Classify a widget response by its `error` field.
    pub fn from_response(response: T) -> Self {
        let error = response.error().map(str::to_owned);
        match error {
            Some(error) => Self::Failed { error, response },
            None => Self::Resolved(response),
        }
    }
}

impl<T> Outcome<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, Self::Abandoned(_))
    }

    pub fn into_result(self) -> Result<T, AdapterError> {
        match self {
            Self::Resolved(response) => Ok(response),
            Self::Failed { error, .. } => Err(AdapterError::Wallet(error)),
            Self::Abandoned(reason) => Err(AdapterError::Abandoned(reason)),
        }
    }
}
