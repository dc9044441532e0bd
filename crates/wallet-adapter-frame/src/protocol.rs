//! Message envelope exchanged with the wallet widget.
//!
//! Messages share the page's `message` channel with unrelated traffic, so
//! every message of this protocol carries `type: "wallet-adapter"`:
//! - **page -> widget**: `{ type, method, params: { id, ...request, state } }`
//! - **widget -> page**: `{ type, id?, action?: "close", payload?: { state?, ... } }`

use serde_json::{Map, Value};
use wallet_adapter_common::{RequestId, StateUpdate, WalletState};

/// Discriminant carried in the `type` field of every protocol message.
pub const PROTOCOL_MARKER: &str = "wallet-adapter";

/// `action` value the widget sends when the user dismisses it.
pub const CLOSE_ACTION: &str = "close";

/// Widget operations and the page each one is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SignIn,
    SendTransaction,
}

impl Operation {
    pub fn method(&self) -> &'static str {
        match self {
            Self::SignIn => "signIn",
            Self::SendTransaction => "sendTransaction",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::SignIn => "/login.html",
            Self::SendTransaction => "/sign.html",
        }
    }
}

/// A request sent into the widget frame once it has loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub method: String,
    pub params: Map<String, Value>,
}

impl OutboundMessage {
    /// Build the params object: caller fields, then `id` and `state`,
    /// which always win over caller fields of the same name.
    pub fn new(
        method: impl Into<String>,
        id: &RequestId,
        request: Map<String, Value>,
        state: &WalletState,
    ) -> Self {
        let mut params = request;
        params.insert("id".to_owned(), Value::String(id.as_str().to_owned()));
        params.insert("state".to_owned(), state.to_value());
        Self {
            method: method.into(),
            params,
        }
    }

    pub fn into_value(self) -> Value {
        let mut envelope = Map::new();
        envelope.insert("type".to_owned(), Value::String(PROTOCOL_MARKER.to_owned()));
        envelope.insert("method".to_owned(), Value::String(self.method));
        envelope.insert("params".to_owned(), Value::Object(self.params));
        Value::Object(envelope)
    }
}

/// A message received on the page's message channel.
///
/// Parsing is lenient: fields of the wrong JSON type read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundMessage {
    pub id: Option<RequestId>,
    pub kind: Option<String>,
    pub action: Option<String>,
    pub payload: Option<Value>,
}

impl InboundMessage {
    /// Returns `None` for non-object data.
    pub fn parse(data: &Value) -> Option<Self> {
        let object = data.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_owned);
        Some(Self {
            id: text("id").map(RequestId::from),
            kind: text("type"),
            action: text("action"),
            payload: object.get("payload").filter(|v| !v.is_null()).cloned(),
        })
    }

    pub fn is_protocol(&self) -> bool {
        self.kind.as_deref() == Some(PROTOCOL_MARKER)
    }

    pub fn is_close(&self) -> bool {
        self.action.as_deref() == Some(CLOSE_ACTION)
    }

    /// The state fragment in `payload.state`, if any.
    pub fn state_update(&self) -> Option<Result<StateUpdate, serde_json::Error>> {
        let state = self.payload.as_ref()?.get("state")?;
        if state.is_null() {
            return None;
        }
        Some(serde_json::from_value(state.clone()))
    }

    /// The payload to settle a request with (`null` when absent).
    pub fn payload_value(&self) -> Value {
        self.payload.clone().unwrap_or(Value::Null)
    }
}
