//! In-process server adapter using axum.
//!
//! This adapter implements the `TestServer` port on top of an `axum::Router`.
//! Requests are handed to the router as tower service calls; no socket is
//! ever opened.

use std::time::Instant;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::routing::MethodRouter;
use http_body_util::BodyExt;
use tandem_application::{ApplicationError, ApplicationResult, TestServer};
use tandem_domain::{Headers, HttpMethod, InjectedResponse, RequestOptions};
use tower::ServiceExt;
use tracing::debug;

/// Server that answers injected requests with an axum router.
///
/// Routes can be installed directly (for example from a pre-registration
/// hook) or through handler modules such as
/// [`RouterModule`](super::RouterModule).
#[derive(Debug, Clone, Default)]
pub struct AxumTestServer {
    router: Router,
}

impl AxumTestServer {
    /// Creates a server with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route.
    ///
    /// # Panics
    ///
    /// Panics the way [`Router::route`] does on an invalid or duplicate path.
    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        self.router = std::mem::take(&mut self.router).route(path, method_router);
        self
    }

    /// Merges another router's routes into this one.
    ///
    /// # Panics
    ///
    /// Panics the way [`Router::merge`] does on overlapping routes.
    pub fn merge(&mut self, other: Router) -> &mut Self {
        self.router = std::mem::take(&mut self.router).merge(other);
        self
    }

    /// Mounts another router under a path prefix.
    ///
    /// # Panics
    ///
    /// Panics the way [`Router::nest`] does on an invalid prefix.
    pub fn nest(&mut self, prefix: &str, other: Router) -> &mut Self {
        self.router = std::mem::take(&mut self.router).nest(prefix, other);
        self
    }

    /// Converts domain `HttpMethod` to `http::Method`.
    const fn to_http_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Appends the encoded query to the target path.
    fn build_uri(options: &RequestOptions) -> ApplicationResult<String> {
        let mut uri = options.url.clone();
        if let Some(query) = options.query.as_ref().filter(|q| !q.is_empty()) {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| ApplicationError::Injection(format!("invalid query: {e}")))?;
            uri.push(if uri.contains('?') { '&' } else { '?' });
            uri.push_str(&encoded);
        }
        Ok(uri)
    }

    /// Builds the `http::Request` handed to the router.
    ///
    /// JSON payloads are serialized and get `application/json` unless the
    /// caller already set a content type. String payloads are sent as is.
    fn build_request(options: &RequestOptions) -> ApplicationResult<Request<Body>> {
        let mut builder = Request::builder()
            .method(Self::to_http_method(options.method))
            .uri(Self::build_uri(options)?);

        for header in options.headers.iter() {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }

        let body = match &options.payload {
            None => Body::empty(),
            Some(serde_json::Value::String(raw)) => Body::from(raw.clone()),
            Some(value) => {
                if !options.headers.contains(CONTENT_TYPE.as_str()) {
                    builder = builder.header(CONTENT_TYPE, "application/json");
                }
                let bytes = serde_json::to_vec(value)
                    .map_err(|e| ApplicationError::Injection(format!("invalid payload: {e}")))?;
                Body::from(bytes)
            }
        };

        builder
            .body(body)
            .map_err(|e| ApplicationError::Injection(format!("invalid request: {e}")))
    }
}

#[async_trait]
impl TestServer for AxumTestServer {
    fn create() -> ApplicationResult<Self> {
        Ok(Self::new())
    }

    async fn inject(&self, options: &RequestOptions) -> ApplicationResult<InjectedResponse> {
        let request = Self::build_request(options)?;
        let start = Instant::now();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let (parts, body) = response.into_parts();
        let body_bytes = body
            .collect()
            .await
            .map_err(|e| ApplicationError::Injection(format!("failed to read body: {e}")))?
            .to_bytes()
            .to_vec();
        let duration = start.elapsed();

        let headers: Headers = parts
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();

        debug!(
            method = %options.method,
            url = %options.url,
            status = parts.status.as_u16(),
            elapsed_ms = duration.as_millis(),
            "request injected"
        );

        Ok(InjectedResponse::new(
            parts.status.as_u16(),
            headers,
            body_bytes,
            duration,
        ))
    }
}
