//! Overlay frame lifecycle.
//!
//! `FrameManager` owns the single overlay slot: opening a frame always
//! removes the previous one first, so at most one frame is ever attached.

use tracing::debug;
use url::Url;

use crate::host::{FrameHost, FrameId};

mod handle;
mod lifecycle;
mod types;

pub use handle::FrameHandle;
pub use types::{CloseReason, FrameSpec, OVERLAY_STYLE};

/// Manages the one-at-a-time overlay frame over a host.
pub struct FrameManager<H> {
    host: H,
    /// Widget base URL that frame paths resolve against.
    base: Url,
    current: Option<FrameHandle>,
}

impl<H: FrameHost> FrameManager<H> {
    pub fn new(host: H, base: Url) -> Self {
        Self {
            host,
            base,
            current: None,
        }
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The attached frame, if any.
    pub fn current(&self) -> Option<&FrameHandle> {
        self.current.as_ref()
    }

    pub fn is_current(&self, frame: FrameId) -> bool {
        self.current.as_ref().is_some_and(|h| h.id() == frame)
    }

    /// Record that `frame` finished loading. Returns `false` for frames
    /// that have since been replaced or removed.
    pub fn mark_loaded(&mut self, frame: FrameId) -> bool {
        match self.current.as_mut() {
            Some(handle) if handle.id() == frame => {
                handle.loaded = true;
                debug!(frame = %frame, url = %handle.url(), "frame loaded");
                true
            }
            _ => false,
        }
    }
}
