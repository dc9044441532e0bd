//! Browser host: overlay `<iframe>` elements and the window `message` event.
//!
//! Values cross the JS boundary as JSON text (`JSON.stringify` /
//! `JSON.parse`), so message data that cannot be stringified is dropped.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};
use wallet_adapter_common::FrameError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlIFrameElement, MessageEvent, Window};

use crate::host::{
    FrameHost, FrameId, InboundEvent, ListenerId, LoadCallback, MessageBus, MessageHandler,
};
use crate::manager::FrameSpec;

struct MountedFrame {
    element: HtmlIFrameElement,
    _on_load: Closure<dyn FnMut()>,
}

/// `FrameHost` + `MessageBus` over the global `window`.
pub struct BrowserHost {
    window: Window,
    next_frame: u64,
    frames: HashMap<FrameId, MountedFrame>,
    next_listener: u64,
    listeners: HashMap<ListenerId, Closure<dyn FnMut(MessageEvent)>>,
}

impl BrowserHost {
    pub fn new() -> Result<Self, FrameError> {
        let window = web_sys::window()
            .ok_or_else(|| FrameError::NoDocument("no global window".to_owned()))?;
        Ok(Self {
            window,
            next_frame: 0,
            frames: HashMap::new(),
            next_listener: 0,
            listeners: HashMap::new(),
        })
    }

    fn create_frame(&self, spec: &FrameSpec) -> Result<HtmlIFrameElement, FrameError> {
        let document = self
            .window
            .document()
            .ok_or_else(|| FrameError::NoDocument("window has no document".to_owned()))?;

        let element = document
            .create_element("iframe")
            .map_err(|e| FrameError::MountFailed(describe(&e)))?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| FrameError::MountFailed("created element is not an iframe".to_owned()))?;

        element.set_src(spec.url.as_str());
        if let Some(allow) = &spec.allow {
            element
                .set_attribute("allow", allow)
                .map_err(|e| FrameError::MountFailed(describe(&e)))?;
        }

        let style = element.style();
        for (property, value) in spec.style {
            style
                .set_property(property, value)
                .map_err(|e| FrameError::MountFailed(describe(&e)))?;
        }

        Ok(element)
    }
}

impl FrameHost for BrowserHost {
    fn mount(&mut self, spec: &FrameSpec, on_load: LoadCallback) -> Result<FrameId, FrameError> {
        let element = self.create_frame(spec)?;
        let body = self
            .window
            .document()
            .and_then(|d| d.body())
            .ok_or_else(|| FrameError::NoDocument("document has no body".to_owned()))?;

        let mut on_load = Some(on_load);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(callback) = on_load.take() {
                callback();
            }
        });
        element.set_onload(Some(closure.as_ref().unchecked_ref()));

        body.append_child(&element)
            .map_err(|e| FrameError::MountFailed(describe(&e)))?;

        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.frames.insert(
            id,
            MountedFrame {
                element,
                _on_load: closure,
            },
        );
        debug!(frame = %id, url = %spec.url, "iframe attached");
        Ok(id)
    }

    fn unmount(&mut self, frame: FrameId) {
        if let Some(mounted) = self.frames.remove(&frame) {
            mounted.element.set_onload(None);
            mounted.element.remove();
            debug!(frame = %frame, "iframe detached");
        }
    }

    fn post_message(
        &self,
        frame: FrameId,
        message: &Value,
        target_origin: &str,
    ) -> Result<(), FrameError> {
        let mounted = self
            .frames
            .get(&frame)
            .ok_or_else(|| FrameError::NotMounted(frame.to_string()))?;
        let target = mounted
            .element
            .content_window()
            .ok_or_else(|| FrameError::PostFailed("frame has no content window".to_owned()))?;

        let text =
            serde_json::to_string(message).map_err(|e| FrameError::PostFailed(e.to_string()))?;
        let data = js_sys::JSON::parse(&text).map_err(|e| FrameError::PostFailed(describe(&e)))?;
        target
            .post_message(&data, target_origin)
            .map_err(|e| FrameError::PostFailed(describe(&e)))
    }
}

impl MessageBus for BrowserHost {
    fn subscribe(&mut self, handler: MessageHandler) -> Result<ListenerId, FrameError> {
        let closure = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(data) = to_json(&event.data()) else {
                return;
            };
            handler(InboundEvent {
                origin: event.origin(),
                data,
            });
        });

        self.window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .map_err(|e| FrameError::ListenerError(describe(&e)))?;

        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.insert(id, closure);
        Ok(id)
    }

    fn unsubscribe(&mut self, listener: ListenerId) {
        if let Some(closure) = self.listeners.remove(&listener) {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                warn!(error = %describe(&e), "failed to remove message listener");
            }
        }
    }
}

impl Drop for BrowserHost {
    fn drop(&mut self) {
        let listeners: Vec<ListenerId> = self.listeners.keys().copied().collect();
        for listener in listeners {
            self.unsubscribe(listener);
        }
        let frames: Vec<FrameId> = self.frames.keys().copied().collect();
        for frame in frames {
            self.unmount(frame);
        }
    }
}

/// Convert message data to JSON. `None` for values JSON cannot represent.
fn to_json(value: &JsValue) -> Option<Value> {
    let text = js_sys::JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&text).ok()
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(value)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
