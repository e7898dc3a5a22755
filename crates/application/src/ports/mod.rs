//! Port definitions (interfaces)
//!
//! Ports define the boundary between the scenario engine and the server it
//! drives. Adapters in the infrastructure layer implement them.

mod handler_module;
mod test_server;

pub use handler_module::{FnModule, HandlerModule, Registration};
pub use test_server::TestServer;
