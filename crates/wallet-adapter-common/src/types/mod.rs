mod request;
mod state;

pub use request::*;
pub use state::*;
