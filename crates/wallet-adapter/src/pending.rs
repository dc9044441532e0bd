//! Pending request table.
//!
//! Maps each in-flight request id to the single-shot sender that settles
//! the caller's `PendingResponse`. An entry leaves the table exactly once:
//! when its response arrives or when its exchange is abandoned.

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};
use wallet_adapter_common::{AbandonReason, Outcome, RequestId, WalletResponse};

/// How an entry left the table.
#[derive(Debug)]
pub(crate) enum Settlement {
    Response(Value),
    Abandoned(AbandonReason),
}

#[derive(Default)]
pub struct PendingTable {
    entries: HashMap<RequestId, oneshot::Sender<Settlement>>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a continuation for `id`.
    pub fn register(&mut self, id: RequestId) -> PendingResponse<Value> {
        let (sender, receiver) = oneshot::channel();
        if let Some(previous) = self.entries.insert(id.clone(), sender) {
            warn!(request_id = %id, "request id collision; abandoning older entry");
            let _ = previous.send(Settlement::Abandoned(AbandonReason::Superseded));
        }
        PendingResponse::new(id, receiver)
    }

    /// Remove the entry for `id`, to be settled by the caller.
    pub(crate) fn take(&mut self, id: &RequestId) -> Option<Resolver> {
        let sender = self.entries.remove(id)?;
        Some(Resolver {
            id: id.clone(),
            sender,
        })
    }

    /// Settle `id` as abandoned. Returns `false` if `id` is not pending.
    pub fn abandon(&mut self, id: &RequestId, reason: AbandonReason) -> bool {
        match self.take(id) {
            Some(resolver) => {
                resolver.abandon(reason);
                true
            }
            None => false,
        }
    }

    pub fn abandon_all(&mut self, reason: AbandonReason) -> usize {
        let count = self.entries.len();
        for (_, sender) in self.entries.drain() {
            let _ = sender.send(Settlement::Abandoned(reason));
        }
        count
    }

    /// Drop the entry for `id` without settling it. Used when the request
    /// never reached the widget and the caller already got an error.
    pub fn discard(&mut self, id: &RequestId) -> bool {
        self.entries.remove(id).is_some()
    }
}

/// An entry already removed from the table, not yet settled.
pub(crate) struct Resolver {
    id: RequestId,
    sender: oneshot::Sender<Settlement>,
}

impl Resolver {
    pub(crate) fn id(&self) -> &RequestId {
        &self.id
    }

    pub(crate) fn resolve(self, payload: Value) {
        debug!(request_id = %self.id, "request resolved");
        self.settle(Settlement::Response(payload));
    }

    pub(crate) fn abandon(self, reason: AbandonReason) {
        debug!(request_id = %self.id, %reason, "request abandoned");
        self.settle(Settlement::Abandoned(reason));
    }

    fn settle(self, settlement: Settlement) {
        if self.sender.send(settlement).is_err() {
            trace!(request_id = %self.id, "pending response dropped before settlement");
        }
    }
}

/// The eventual outcome of one exchange.
///
/// Resolves to `Outcome<T>`, decoding the widget's payload into `T`.
/// A `null` or missing payload decodes as `T::default()`.
#[derive(Debug)]
#[must_use = "a pending response does nothing unless awaited"]
pub struct PendingResponse<T> {
    id: RequestId,
    receiver: oneshot::Receiver<Settlement>,
    _response: PhantomData<fn() -> T>,
}

impl<T> PendingResponse<T> {
    fn new(id: RequestId, receiver: oneshot::Receiver<Settlement>) -> Self {
        Self {
            id,
            receiver,
            _response: PhantomData,
        }
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub(crate) fn cast<U>(self) -> PendingResponse<U> {
        PendingResponse::new(self.id, self.receiver)
    }
}

impl<T> PendingResponse<T>
where
    T: DeserializeOwned + Default + WalletResponse,
{
    /// Non-blocking check. `None` while the exchange is in flight; once it
    /// returns `Some`, the response has been consumed.
    pub fn try_outcome(&mut self) -> Option<Outcome<T>> {
        match self.receiver.try_recv() {
            Ok(settlement) => Some(decode(settlement)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                Some(Outcome::Abandoned(AbandonReason::Destroyed))
            }
        }
    }
}

impl<T> Future for PendingResponse<T>
where
    T: DeserializeOwned + Default + WalletResponse,
{
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(settlement)) => Poll::Ready(decode(settlement)),
            // Sender dropped with the adapter.
            Poll::Ready(Err(_)) => Poll::Ready(Outcome::Abandoned(AbandonReason::Destroyed)),
        }
    }
}

fn decode<T>(settlement: Settlement) -> Outcome<T>
where
    T: DeserializeOwned + Default + WalletResponse,
{
    match settlement {
        Settlement::Abandoned(reason) => Outcome::Abandoned(reason),
        Settlement::Response(Value::Null) => Outcome::from_response(T::default()),
        Settlement::Response(payload) => match serde_json::from_value::<T>(payload) {
            Ok(response) => Outcome::from_response(response),
            Err(e) => {
                warn!(error = %e, "wallet response did not match the expected shape");
                Outcome::Failed {
                    error: format!("malformed wallet response: {e}"),
                    response: T::default(),
                }
            }
        },
    }
}
