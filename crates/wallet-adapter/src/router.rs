//! Inbound message routing.
//!
//! Every message on the page's channel passes through `Shared::dispatch`.
//! Messages from another origin, or without the protocol marker, are
//! dropped silently: the channel is shared with unrelated traffic.

use tracing::{debug, trace, warn};
use wallet_adapter_common::{AbandonReason, RequestId};
use wallet_adapter_frame::{CloseReason, FrameHost, InboundEvent, InboundMessage};

use crate::adapter::Shared;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Destroyed,
    OriginMismatch,
    NotProtocol,
}

/// What routing one inbound message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Ignored(IgnoreReason),
    /// The widget asked to be closed.
    Closed,
    Handled {
        state_updated: bool,
        /// Set when the message settled a pending request.
        resolved: Option<RequestId>,
    },
}

impl<H: FrameHost> Shared<H> {
    pub(crate) fn dispatch(&self, event: &InboundEvent) -> Dispatch {
        // Every table and frame change happens under one borrow. Only the
        // state listener and the settlement run after it is released.
        let (snapshot, settlement) = {
            let mut guard = self.core.borrow_mut();
            let core = &mut *guard;
            if core.destroyed {
                return Dispatch::Ignored(IgnoreReason::Destroyed);
            }
            if !core.config.target_origin.matches(&event.origin) {
                trace!(origin = %event.origin, "message from unexpected origin");
                return Dispatch::Ignored(IgnoreReason::OriginMismatch);
            }
            let message = match InboundMessage::parse(&event.data) {
                Some(m) if m.is_protocol() => m,
                _ => return Dispatch::Ignored(IgnoreReason::NotProtocol),
            };

            if message.is_close() {
                if let Some(frame) = core.frames.close(CloseReason::ClosedByWidget) {
                    if let Some(id) = frame.request_id() {
                        core.pending.abandon(id, AbandonReason::ClosedByUser);
                    }
                }
                debug!("wallet widget closed by user");
                return Dispatch::Closed;
            }

            let snapshot = match message.state_update() {
                Some(Ok(update)) => {
                    core.state.merge(&update);
                    Some(core.state.clone())
                }
                Some(Err(e)) => {
                    warn!(error = %e, "ignoring malformed wallet state update");
                    None
                }
                None => None,
            };

            let resolver = message.id.as_ref().and_then(|id| {
                let resolver = core.pending.take(id);
                if resolver.is_none() {
                    trace!(request_id = %id, "response for unknown request");
                }
                resolver
            });
            if resolver.is_some() {
                core.frames.close(CloseReason::Resolved);
            }
            (snapshot, resolver.map(|r| (r, message.payload_value())))
        };

        let state_updated = snapshot.is_some();
        if let (Some(listener), Some(state)) = (&self.on_state_update, &snapshot) {
            listener(state);
        }

        let resolved = settlement.and_then(|(resolver, payload)| {
            if self.core.borrow().destroyed {
                resolver.abandon(AbandonReason::Destroyed);
                None
            } else {
                let id = resolver.id().clone();
                resolver.resolve(payload);
                Some(id)
            }
        });

        Dispatch::Handled {
            state_updated,
            resolved,
        }
    }
}
