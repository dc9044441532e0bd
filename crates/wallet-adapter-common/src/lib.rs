pub mod errors;
pub mod id;
pub mod outcome;
pub mod types;

pub use errors::{AdapterError, ConfigError, FrameError};
pub use id::{new_request_id, RequestId};
pub use outcome::{AbandonReason, Outcome, WalletResponse};
pub use types::{
    Amount, SignInRequest, SignInResult, StateUpdate, TransactionRequest, TransactionResult,
    WalletAction, WalletId, WalletState,
};

pub type Result<T> = std::result::Result<T, AdapterError>;
