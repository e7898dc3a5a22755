//! Application error types

use thiserror::Error;

/// Application-level errors.
///
/// Assertion failures are not errors; they are collected on the request
/// that produced them. These variants cover runs that cannot proceed.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The server could not be created or prepared.
    #[error("bootstrap error: {0}")]
    Bootstrap(String),

    /// A handler module failed to register.
    #[error("handler module {module} failed to register: {reason}")]
    Registration {
        /// Registration name of the module (e.g. `plugin0`).
        module: String,
        /// Why it failed.
        reason: String,
    },

    /// The server could not inject a request.
    #[error("injection error: {0}")]
    Injection(String),

    /// A run was requested with no queued requests.
    #[error("scenario has no requests to run")]
    EmptyScenario,
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
