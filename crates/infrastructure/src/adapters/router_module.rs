//! Handler module backed by an axum router

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use async_trait::async_trait;
use axum::Router;
use tandem_application::{ApplicationError, ApplicationResult, HandlerModule, Registration};
use tracing::debug;

use super::AxumTestServer;

/// A set of routes installed on an [`AxumTestServer`] at bootstrap.
#[derive(Debug, Clone)]
pub struct RouterModule {
    router: Router,
    prefix: Option<String>,
}

impl RouterModule {
    /// Module whose routes are merged at the server root.
    #[must_use]
    pub const fn new(router: Router) -> Self {
        Self {
            router,
            prefix: None,
        }
    }

    /// Module whose routes are mounted under `prefix`.
    #[must_use]
    pub fn nested(prefix: impl Into<String>, router: Router) -> Self {
        Self {
            router,
            prefix: Some(prefix.into()),
        }
    }

    /// Path prefix, if the module is nested.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl From<Router> for RouterModule {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}

#[async_trait]
impl HandlerModule<AxumTestServer> for RouterModule {
    async fn register(
        &self,
        server: &mut AxumTestServer,
        registration: &Registration,
    ) -> ApplicationResult<()> {
        if let Some(prefix) = &self.prefix {
            // axum refuses to nest at the root or without a leading slash
            if prefix.len() < 2 || !prefix.starts_with('/') {
                return Err(ApplicationError::Bootstrap(format!(
                    "invalid nest prefix: '{prefix}'"
                )));
            }
        }

        // axum panics on overlapping routes; the server is discarded on error
        let router = self.router.clone();
        panic::catch_unwind(AssertUnwindSafe(|| match &self.prefix {
            Some(prefix) => {
                server.nest(prefix, router);
            }
            None => {
                server.merge(router);
            }
        }))
        .map_err(|payload| ApplicationError::Bootstrap(panic_message(payload.as_ref())))?;

        debug!(
            module = %registration.name,
            version = %registration.version,
            prefix = self.prefix.as_deref().unwrap_or("/"),
            "routes installed"
        );
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "route installation panicked".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::routing::get;
    use pretty_assertions::assert_eq;
    use tandem_application::TestServer;
    use tandem_domain::{HttpMethod, RequestOptions};

    fn ping() -> Router {
        Router::new().route("/ping", get(|| async { "pong" }))
    }

    #[tokio::test]
    async fn test_merged_module() {
        let mut server = AxumTestServer::new();
        RouterModule::new(ping())
            .register(&mut server, &Registration::indexed(0))
            .await
            .unwrap();

        let response = server
            .inject(&RequestOptions::new(HttpMethod::Get, "/ping"))
            .await
            .unwrap();
        assert_eq!(response.payload, "pong");
    }

    #[tokio::test]
    async fn test_nested_module() {
        let mut server = AxumTestServer::new();
        let module = RouterModule::nested("/api", ping());
        assert_eq!(module.prefix(), Some("/api"));
        module
            .register(&mut server, &Registration::indexed(0))
            .await
            .unwrap();

        let nested = server
            .inject(&RequestOptions::new(HttpMethod::Get, "/api/ping"))
            .await
            .unwrap();
        assert_eq!(nested.status, 200);

        let root = server
            .inject(&RequestOptions::new(HttpMethod::Get, "/ping"))
            .await
            .unwrap();
        assert_eq!(root.status, 404);
    }

    #[tokio::test]
    async fn test_overlapping_routes_are_a_bootstrap_error() {
        let mut server = AxumTestServer::new();
        RouterModule::new(ping())
            .register(&mut server, &Registration::indexed(0))
            .await
            .unwrap();

        let result = RouterModule::new(ping())
            .register(&mut server, &Registration::indexed(1))
            .await;
        match result {
            Err(ApplicationError::Bootstrap(reason)) => {
                assert!(reason.contains("/ping"), "{reason}");
            }
            other => panic!("expected bootstrap error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_root_prefix_is_rejected() {
        let mut server = AxumTestServer::new();
        let result = RouterModule::nested("/", ping())
            .register(&mut server, &Registration::indexed(0))
            .await;
        assert!(matches!(result, Err(ApplicationError::Bootstrap(_))));
    }
}
