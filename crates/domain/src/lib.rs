//! Tandem Domain - Core scenario types
//!
//! This crate defines the domain model for the Tandem scenario tester:
//! queued request descriptors, the responses they produce, assertions,
//! and the session state carried between requests.
//! All types here are pure Rust with no I/O dependencies.

pub mod cookie;
pub mod error;
pub mod request;
pub mod response;
pub mod session;
pub mod settings;
pub mod testing;

pub use cookie::{extract_session_token, session_cookie};
pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, RequestDescriptor, RequestOptions};
pub use response::{InjectedResponse, StatusCode};
pub use session::SessionState;
pub use settings::ScenarioSettings;
pub use testing::{
    Assertion, AssertionKind, CompletionCallback, Failure, ResponsePredicate, SessionHook,
};
