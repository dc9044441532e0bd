//! Browser connector for a hosted wallet widget.
//!
//! The widget runs in an overlay `<iframe>`; requests and responses cross
//! the frame boundary as `postMessage` envelopes. One exchange runs at a
//! time: starting a new one replaces the frame and abandons the old one.
//!
//! ```rust,ignore
//! let adapter = WalletAdapter::new(BrowserHost::new()?, AdapterConfig::default(), None)?;
//! let pending = adapter.sign_in(SignInRequest::new("mainnet", "app.near"))?;
//! match pending.await {
//!     Outcome::Resolved(result) => println!("signed in as {:?}", result.account_id),
//!     Outcome::Failed { error, .. } => eprintln!("wallet error: {error}"),
//!     Outcome::Abandoned(reason) => eprintln!("{reason}"),
//! }
//! ```

pub mod adapter;
pub mod pending;
pub mod router;

#[cfg(feature = "web")]
pub mod bindings;

pub use adapter::{StateListener, WalletAdapter};
pub use pending::{PendingResponse, PendingTable};
pub use router::{Dispatch, IgnoreReason};

pub use wallet_adapter_common::{
    AbandonReason, AdapterError, Amount, Outcome, RequestId, Result, SignInRequest, SignInResult,
    StateUpdate, TransactionRequest, TransactionResult, WalletAction, WalletId, WalletState,
};
pub use wallet_adapter_config::{AdapterConfig, TargetOrigin, DEFAULT_WIDGET_URL};
pub use wallet_adapter_frame::{FrameHost, InboundEvent, MessageBus, Operation};

#[cfg(feature = "web")]
pub use wallet_adapter_frame::web::BrowserHost;
