//! Overlay frame bridge for the wallet widget.
//!
//! Provides:
//! - The host seams (`FrameHost`, `MessageBus`) between the adapter and the
//!   page it runs in
//! - A one-at-a-time overlay frame manager
//! - The cross-document message envelope (`protocol`)
//! - A web-sys backed host behind the `web` feature

pub mod host;
pub mod manager;
pub mod protocol;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(feature = "web")]
pub mod web;

pub use host::{FrameHost, FrameId, InboundEvent, ListenerId, LoadCallback, MessageBus, MessageHandler};
pub use manager::{CloseReason, FrameHandle, FrameManager, FrameSpec, OVERLAY_STYLE};
pub use protocol::{InboundMessage, Operation, OutboundMessage, CLOSE_ACTION, PROTOCOL_MARKER};
