//! Adapters implementing the application ports.

mod axum_server;
mod router_module;

pub use axum_server::AxumTestServer;
pub use router_module::RouterModule;
