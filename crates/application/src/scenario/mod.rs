//! Request scenarios.
//!
//! A [`Scenario`] queues requests, attaches assertions to them through
//! [`RequestHandle`]s, and runs the whole sequence against a freshly
//! bootstrapped server. Requests execute strictly one after another; session
//! headers established by one request are merged into every later one.

mod auth;
mod builder;
mod handle;
mod report;
mod runner;

#[cfg(test)]
mod test_support;

pub use auth::login_assertion;
pub use builder::{BeforeHook, BootstrapOptions, Scenario};
pub use handle::RequestHandle;
pub use report::{RequestOutcome, RunReport};
