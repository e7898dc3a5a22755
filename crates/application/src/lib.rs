//! Tandem Application - Scenario engine
//!
//! This crate builds and runs request scenarios against an in-process
//! server. The server itself is reached only through the ports defined in
//! [`ports`]; concrete servers live in the infrastructure layer.

pub mod error;
pub mod evaluator;
pub mod ports;
pub mod scenario;

pub use error::{ApplicationError, ApplicationResult};
pub use evaluator::{evaluate, evaluate_all};
pub use ports::{FnModule, HandlerModule, Registration, TestServer};
pub use scenario::{
    BeforeHook, BootstrapOptions, RequestHandle, RequestOutcome, RunReport, Scenario,
    login_assertion,
};
