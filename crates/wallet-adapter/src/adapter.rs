//! Public connector API.
//!
//! `WalletAdapter` owns the overlay frame slot, the pending request table
//! and the wallet state snapshot. It is a cheap-clone, single-threaded
//! handle: every clone drives the same connector.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;
use wallet_adapter_common::{
    new_request_id, AbandonReason, AdapterError, RequestId, Result, SignInRequest, SignInResult,
    TransactionRequest, TransactionResult, WalletState,
};
use wallet_adapter_config::{validation, AdapterConfig};
use wallet_adapter_frame::{
    CloseReason, FrameHandle, FrameHost, FrameManager, InboundEvent, ListenerId, LoadCallback,
    MessageBus, MessageHandler, Operation, OutboundMessage,
};

use crate::pending::{PendingResponse, PendingTable};
use crate::router::Dispatch;

/// Called synchronously with the full snapshot after every state update.
pub type StateListener = Box<dyn Fn(&WalletState)>;

pub(crate) struct Core<H> {
    pub(crate) config: AdapterConfig,
    pub(crate) frames: FrameManager<H>,
    pub(crate) pending: PendingTable,
    pub(crate) state: WalletState,
    pub(crate) listener: Option<ListenerId>,
    pub(crate) destroyed: bool,
}

pub(crate) struct Shared<H> {
    pub(crate) core: RefCell<Core<H>>,
    /// Kept outside `core` so the listener may call back into the adapter.
    pub(crate) on_state_update: Option<StateListener>,
}

pub struct WalletAdapter<H> {
    shared: Rc<Shared<H>>,
}

impl<H> Clone for WalletAdapter<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<H: FrameHost + MessageBus + 'static> WalletAdapter<H> {
    /// Create a connector and subscribe it to the host's message stream.
    pub fn new(
        host: H,
        config: AdapterConfig,
        on_state_update: Option<StateListener>,
    ) -> Result<Self> {
        validation::validate(&config)?;
        let base = config.widget_base()?;

        let shared = Rc::new(Shared {
            core: RefCell::new(Core {
                config,
                frames: FrameManager::new(host, base),
                pending: PendingTable::new(),
                state: WalletState::default(),
                listener: None,
                destroyed: false,
            }),
            on_state_update,
        });

        let weak: Weak<Shared<H>> = Rc::downgrade(&shared);
        let handler: MessageHandler = Rc::new(move |event: InboundEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.dispatch(&event);
            }
        });

        {
            let mut core = shared.core.borrow_mut();
            let listener = core.frames.host_mut().subscribe(handler)?;
            core.listener = Some(listener);
            debug!(
                widget_url = %core.config.widget_url,
                target_origin = %core.config.target_origin.as_str(),
                "wallet adapter created"
            );
        }

        Ok(Self { shared })
    }

    /// Ask the widget to sign in (`/login.html`).
    pub fn sign_in(&self, request: SignInRequest) -> Result<PendingResponse<SignInResult>> {
        self.call(Operation::SignIn, &request)
    }

    /// Ask the widget to sign and send a transaction (`/sign.html`).
    pub fn send_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<PendingResponse<TransactionResult>> {
        self.call(Operation::SendTransaction, &request)
    }

    fn call<R: Serialize, T>(&self, operation: Operation, request: &R) -> Result<PendingResponse<T>> {
        let params = serde_json::to_value(request)?;
        let pending = self.request(operation.path(), operation.method(), params)?;
        Ok(pending.cast())
    }

    /// Start one exchange: open a frame at `path` and, once it has loaded,
    /// send `method` with `params` (a JSON object or `null`).
    ///
    /// An exchange still in flight is abandoned as superseded once its
    /// frame has been replaced. A path that does not resolve fails without
    /// touching the current exchange.
    pub fn request(&self, path: &str, method: &str, params: Value) -> Result<PendingResponse<Value>> {
        let params = match params {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(AdapterError::InvalidParams(format!(
                    "expected an object, got {other}"
                )))
            }
        };

        let mut guard = self.shared.core.borrow_mut();
        let core = &mut *guard;
        if core.destroyed {
            return Err(AdapterError::Destroyed);
        }

        let previous = core.frames.current().and_then(|h| h.request_id().cloned());
        let id = new_request_id();
        let response = core.pending.register(id.clone());
        let on_load = self.load_callback(id.clone(), method.to_owned(), params);

        match core.frames.open(path, Some(id.clone()), on_load) {
            Ok((frame, evicted)) => {
                if let Some(evicted) = evicted.as_ref().and_then(FrameHandle::request_id) {
                    core.pending.abandon(evicted, AbandonReason::Superseded);
                }
                debug!(request_id = %id, method, frame = %frame.id(), "request started");
                Ok(response)
            }
            Err(e) => {
                warn!(request_id = %id, method, error = %e, "failed to open wallet frame");
                core.pending.discard(&id);
                // A failed mount still removed the previous frame.
                if let Some(previous) = previous {
                    if core.frames.current().is_none() {
                        core.pending.abandon(&previous, AbandonReason::Superseded);
                    }
                }
                Err(e.into())
            }
        }
    }

    fn load_callback(&self, id: RequestId, method: String, params: Map<String, Value>) -> LoadCallback {
        let weak = Rc::downgrade(&self.shared);
        Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.frame_loaded(&id, method, params);
            }
        })
    }

    /// Route one inbound message as if it arrived on the message stream.
    pub fn handle_message(&self, event: &InboundEvent) -> Dispatch {
        self.shared.dispatch(event)
    }

    /// A copy of the current wallet state.
    pub fn get_state(&self) -> WalletState {
        self.shared.core.borrow().state.clone()
    }

    pub fn config(&self) -> AdapterConfig {
        self.shared.core.borrow().config.clone()
    }

    pub fn has_frame(&self) -> bool {
        self.shared.core.borrow().frames.current().is_some()
    }

    /// URL of the attached overlay frame, if any.
    pub fn frame_url(&self) -> Option<Url> {
        self.shared
            .core
            .borrow()
            .frames
            .current()
            .map(|h| h.url().clone())
    }

    pub fn pending_count(&self) -> usize {
        self.shared.core.borrow().pending.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.core.borrow().destroyed
    }

    /// Unsubscribe from the message stream, remove any frame and abandon
    /// every pending exchange. Nothing changes state after this returns.
    pub fn destroy(&self) {
        let mut guard = self.shared.core.borrow_mut();
        let core = &mut *guard;
        if core.destroyed {
            return;
        }
        core.destroyed = true;

        if let Some(listener) = core.listener.take() {
            core.frames.host_mut().unsubscribe(listener);
        }
        core.frames.close(CloseReason::Teardown);
        let abandoned = core.pending.abandon_all(AbandonReason::Destroyed);
        debug!(abandoned, "wallet adapter destroyed");
    }
}

impl<H: FrameHost> Shared<H> {
    /// Post the request into its frame, if that frame is still attached.
    fn frame_loaded(&self, id: &RequestId, method: String, params: Map<String, Value>) {
        let mut guard = self.core.borrow_mut();
        let core = &mut *guard;
        if core.destroyed {
            return;
        }

        let frame = match core.frames.current() {
            Some(handle) if handle.request_id() == Some(id) && !handle.is_loaded() => handle.id(),
            _ => {
                debug!(request_id = %id, "ignoring load of a replaced or loaded frame");
                return;
            }
        };
        core.frames.mark_loaded(frame);

        let message = OutboundMessage::new(method, id, params, &core.state).into_value();
        if let Err(e) = core
            .frames
            .post(frame, &message, core.config.target_origin.as_str())
        {
            warn!(request_id = %id, error = %e, "failed to post request to wallet frame");
        }
    }
}
