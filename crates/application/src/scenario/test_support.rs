//! In-memory server used by the scenario tests.
#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tandem_domain::{Headers, HttpMethod, InjectedResponse, RequestOptions};

use crate::ApplicationResult;
use crate::ports::{FnModule, HandlerModule, TestServer};

type Handler = Arc<dyn Fn(&RequestOptions) -> InjectedResponse + Send + Sync>;

/// Every request a [`MockServer`] received, in order.
pub type RequestLog = Arc<Mutex<Vec<RequestOptions>>>;

/// Route table answering injected requests without any I/O.
#[derive(Default)]
pub struct MockServer {
    routes: Vec<(HttpMethod, String, Handler)>,
    log: Option<RequestLog>,
    /// Set by tests from the pre-registration hook.
    pub prepared: bool,
}

impl MockServer {
    pub fn route<F>(&mut self, method: HttpMethod, path: &str, handler: F)
    where
        F: Fn(&RequestOptions) -> InjectedResponse + Send + Sync + 'static,
    {
        self.routes.push((method, path.to_string(), Arc::new(handler)));
    }

    pub fn record_into(&mut self, log: RequestLog) {
        self.log = Some(log);
    }
}

#[async_trait]
impl TestServer for MockServer {
    fn create() -> ApplicationResult<Self> {
        Ok(Self::default())
    }

    async fn inject(&self, options: &RequestOptions) -> ApplicationResult<InjectedResponse> {
        if let Some(log) = &self.log {
            log.lock().expect("log lock").push(options.clone());
        }
        let response = self
            .routes
            .iter()
            .find(|(method, path, _)| *method == options.method && *path == options.url)
            .map_or_else(
                || InjectedResponse::with_status(404),
                |(_, _, handler)| handler(options),
            );
        Ok(response)
    }
}

pub fn new_log() -> RequestLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// An app with a cookie login, a protected profile, and a few fixed statuses.
pub fn app(log: &RequestLog) -> Arc<dyn HandlerModule<MockServer>> {
    let log = Arc::clone(log);
    Arc::new(FnModule::new(move |server: &mut MockServer| -> ApplicationResult<()> {
        server.record_into(Arc::clone(&log));
        server.route(HttpMethod::Post, "/login", |options| {
            let password = options
                .payload
                .as_ref()
                .and_then(|p| p.get("password"))
                .and_then(serde_json::Value::as_str);
            if password == Some("secret") {
                let headers: Headers = [("set-cookie", "sid=tok-123; Path=/; HttpOnly")]
                    .into_iter()
                    .collect();
                InjectedResponse::new(200u16, headers, Vec::new(), std::time::Duration::ZERO)
            } else {
                InjectedResponse::with_status(401)
            }
        });
        server.route(HttpMethod::Get, "/profile", |options| {
            if options.headers.contains("cookie") {
                InjectedResponse::with_status(200)
            } else {
                InjectedResponse::with_status(401)
            }
        });
        server.route(HttpMethod::Get, "/ok", |_| InjectedResponse::with_status(200));
        server.route(HttpMethod::Get, "/busy", |_| InjectedResponse::with_status(503));
        server.route(HttpMethod::Post, "/items", |_| InjectedResponse::with_status(201));
        Ok(())
    }))
}

pub fn seen(log: &RequestLog) -> Vec<RequestOptions> {
    log.lock().expect("log lock").clone()
}
