//! Seams between the adapter and the page hosting it.
//!
//! Everything runs on the page's single event loop, so callbacks are plain
//! `Rc`/`Box` closures with no `Send` bound. A host must never invoke a
//! callback from inside the call that registered it: load notifications and
//! inbound messages are delivered from later event-loop turns.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use wallet_adapter_common::FrameError;

use crate::manager::FrameSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Fired once, when the frame's document has loaded.
pub type LoadCallback = Box<dyn FnOnce()>;

/// One cross-document message as seen by the page.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    /// Origin of the sending window (`MessageEvent.origin`).
    pub origin: String,
    pub data: Value,
}

pub type MessageHandler = Rc<dyn Fn(InboundEvent)>;

/// Attaches and removes overlay frames in the document.
pub trait FrameHost {
    fn mount(&mut self, spec: &FrameSpec, on_load: LoadCallback) -> Result<FrameId, FrameError>;

    /// Detach a frame. Unknown ids are ignored.
    fn unmount(&mut self, frame: FrameId);

    fn post_message(
        &self,
        frame: FrameId,
        message: &Value,
        target_origin: &str,
    ) -> Result<(), FrameError>;
}

/// The page's inbound cross-document message stream.
pub trait MessageBus {
    fn subscribe(&mut self, handler: MessageHandler) -> Result<ListenerId, FrameError>;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&mut self, listener: ListenerId);
}
