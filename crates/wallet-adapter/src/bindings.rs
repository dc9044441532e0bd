//! JavaScript bindings.
//!
//! Exposes the connector to JS as `WalletAdapter`:
//!
//! ```js
//! const adapter = new WalletAdapter({ onStateUpdate: (state) => save(state) });
//! const { accountId } = await adapter.signIn({ networkId: "mainnet", contractId: "app.near" });
//! ```
//!
//! Response payloads resolve the returned promise as-is, including ones
//! that carry an `error` field. Abandoned exchanges reject.

use js_sys::{Function, Promise, Reflect};
use serde_json::Value;
use tracing::warn;
use wallet_adapter_common::{Outcome, WalletState};
use wallet_adapter_config::{AdapterConfig, DEFAULT_WIDGET_URL};
use wallet_adapter_frame::web::BrowserHost;
use wallet_adapter_frame::Operation;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;

use crate::adapter::{StateListener, WalletAdapter};

#[wasm_bindgen(js_name = WalletAdapter)]
pub struct JsWalletAdapter {
    inner: WalletAdapter<BrowserHost>,
}

#[wasm_bindgen(js_class = WalletAdapter)]
impl JsWalletAdapter {
    /// `config` may carry `widgetUrl`, `targetOrigin` and an
    /// `onStateUpdate(state)` function. Every key is optional.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsWalletAdapter, JsError> {
        let (config, on_state_update) = if config.is_undefined() || config.is_null() {
            (AdapterConfig::default(), None)
        } else {
            let listener = state_listener(&config)?;
            let raw = from_js(&config).unwrap_or_else(|| Value::Object(Default::default()));
            let config = AdapterConfig::from_json(&raw.to_string()).map_err(to_js_error)?;
            (config, listener)
        };

        let host = BrowserHost::new().map_err(to_js_error)?;
        let inner = WalletAdapter::new(host, config, on_state_update).map_err(to_js_error)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = signIn)]
    pub fn sign_in(&self, params: JsValue) -> Result<Promise, JsError> {
        self.start(Operation::SignIn, params)
    }

    #[wasm_bindgen(js_name = sendTransaction)]
    pub fn send_transaction(&self, params: JsValue) -> Result<Promise, JsError> {
        self.start(Operation::SendTransaction, params)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        to_js(&self.inner.get_state().to_value())
    }

    pub fn destroy(&self) {
        self.inner.destroy();
    }

    #[wasm_bindgen(js_name = defaultWidgetUrl)]
    pub fn default_widget_url() -> String {
        DEFAULT_WIDGET_URL.to_owned()
    }
}

impl JsWalletAdapter {
    fn start(&self, operation: Operation, params: JsValue) -> Result<Promise, JsError> {
        let params = from_js(&params).unwrap_or(Value::Null);
        let pending = self
            .inner
            .request(operation.path(), operation.method(), params)
            .map_err(to_js_error)?;

        Ok(future_to_promise(async move {
            match pending.await {
                Outcome::Resolved(payload) | Outcome::Failed { response: payload, .. } => {
                    Ok(to_js(&payload))
                }
                Outcome::Abandoned(reason) => {
                    Err(JsError::new(&format!("request abandoned: {reason}")).into())
                }
            }
        }))
    }
}

fn state_listener(config: &JsValue) -> Result<Option<StateListener>, JsError> {
    let value = Reflect::get(config, &JsValue::from_str("onStateUpdate"))
        .map_err(|_| JsError::new("failed to read onStateUpdate"))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let callback = value
        .dyn_into::<Function>()
        .map_err(|_| JsError::new("onStateUpdate must be a function"))?;

    let listener: StateListener = Box::new(move |state: &WalletState| {
        if let Err(e) = callback.call1(&JsValue::NULL, &to_js(&state.to_value())) {
            warn!(error = ?e, "onStateUpdate threw");
        }
    });
    Ok(Some(listener))
}

/// `None` for `undefined` and values JSON cannot represent.
fn from_js(value: &JsValue) -> Option<Value> {
    let text = js_sys::JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&text).ok()
}

fn to_js(value: &Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}
