//! In-memory host for tests.
//!
//! `RecordingHost` is a cheap-clone handle: give one clone to the code
//! under test and keep another to drive load notifications and inbound
//! messages and to inspect what was mounted and posted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use url::Url;
use wallet_adapter_common::FrameError;

use crate::host::{
    FrameHost, FrameId, InboundEvent, ListenerId, LoadCallback, MessageBus, MessageHandler,
};
use crate::manager::FrameSpec;

/// A message posted into a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub frame: FrameId,
    pub message: Value,
    pub target_origin: String,
}

#[derive(Default)]
struct Recording {
    next_frame: u64,
    next_listener: u64,
    live: Vec<(FrameId, FrameSpec)>,
    mounts: Vec<Url>,
    max_live: usize,
    pending_loads: HashMap<FrameId, LoadCallback>,
    posted: Vec<PostedMessage>,
    listeners: Vec<(ListenerId, MessageHandler)>,
    fail_next_mount: Option<String>,
}

#[derive(Clone, Default)]
pub struct RecordingHost {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames currently attached, oldest first.
    pub fn live_frames(&self) -> Vec<FrameId> {
        self.inner.borrow().live.iter().map(|(id, _)| *id).collect()
    }

    pub fn frame_url(&self, frame: FrameId) -> Option<Url> {
        self.inner
            .borrow()
            .live
            .iter()
            .find(|(id, _)| *id == frame)
            .map(|(_, spec)| spec.url.clone())
    }

    /// URL of every frame ever mounted, in order.
    pub fn mounts(&self) -> Vec<Url> {
        self.inner.borrow().mounts.clone()
    }

    /// Highest number of frames attached at the same time.
    pub fn max_live_frames(&self) -> usize {
        self.inner.borrow().max_live
    }

    pub fn posted(&self) -> Vec<PostedMessage> {
        self.inner.borrow().posted.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Make the next `mount` fail with `FrameError::MountFailed`.
    pub fn fail_next_mount(&self, reason: impl Into<String>) {
        self.inner.borrow_mut().fail_next_mount = Some(reason.into());
    }

    /// Fire the load notification of an attached frame. Returns `false` if
    /// the frame is gone or already loaded.
    pub fn finish_load(&self, frame: FrameId) -> bool {
        let callback = self.inner.borrow_mut().pending_loads.remove(&frame);
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Deliver a message to every subscribed listener.
    pub fn deliver(&self, origin: &str, data: Value) {
        let listeners: Vec<MessageHandler> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in listeners {
            handler(InboundEvent {
                origin: origin.to_owned(),
                data: data.clone(),
            });
        }
    }
}

impl FrameHost for RecordingHost {
    fn mount(&mut self, spec: &FrameSpec, on_load: LoadCallback) -> Result<FrameId, FrameError> {
        let mut rec = self.inner.borrow_mut();
        if let Some(reason) = rec.fail_next_mount.take() {
            return Err(FrameError::MountFailed(reason));
        }
        rec.next_frame += 1;
        let id = FrameId(rec.next_frame);
        rec.live.push((id, spec.clone()));
        rec.mounts.push(spec.url.clone());
        let live = rec.live.len();
        rec.max_live = rec.max_live.max(live);
        rec.pending_loads.insert(id, on_load);
        Ok(id)
    }

    fn unmount(&mut self, frame: FrameId) {
        let mut rec = self.inner.borrow_mut();
        rec.live.retain(|(id, _)| *id != frame);
        rec.pending_loads.remove(&frame);
    }

    fn post_message(
        &self,
        frame: FrameId,
        message: &Value,
        target_origin: &str,
    ) -> Result<(), FrameError> {
        let mut rec = self.inner.borrow_mut();
        if !rec.live.iter().any(|(id, _)| *id == frame) {
            return Err(FrameError::NotMounted(frame.to_string()));
        }
        rec.posted.push(PostedMessage {
            frame,
            message: message.clone(),
            target_origin: target_origin.to_owned(),
        });
        Ok(())
    }
}

impl MessageBus for RecordingHost {
    fn subscribe(&mut self, handler: MessageHandler) -> Result<ListenerId, FrameError> {
        let mut rec = self.inner.borrow_mut();
        rec.next_listener += 1;
        let id = ListenerId(rec.next_listener);
        rec.listeners.push((id, handler));
        Ok(id)
    }

    fn unsubscribe(&mut self, listener: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != listener);
    }
}
