//! HTTP Response domain types

mod injected;
mod status;

pub use injected::InjectedResponse;
pub use status::StatusCode;
