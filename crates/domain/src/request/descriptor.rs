//! Queued request descriptor

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use super::{HttpMethod, RequestOptions};
use crate::testing::{Assertion, CompletionCallback, Failure};

/// One planned call, its assertions, and the failures collected for it.
///
/// Method, target, query and payload are fixed at creation. Assertions and
/// callbacks are only added by whoever holds the handle to this descriptor;
/// failures are appended by the runner.
#[derive(Clone)]
pub struct RequestDescriptor {
    id: Uuid,
    method: HttpMethod,
    target: String,
    query: Option<BTreeMap<String, String>>,
    payload: Option<serde_json::Value>,
    assertions: Vec<Assertion>,
    callbacks: Vec<CompletionCallback>,
    failures: Vec<Failure>,
}

impl RequestDescriptor {
    fn new(method: HttpMethod, target: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            target: target.into(),
            query: None,
            payload: None,
            assertions: Vec::new(),
            callbacks: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Creates a GET descriptor with an optional query.
    #[must_use]
    pub fn get(target: impl Into<String>, query: Option<BTreeMap<String, String>>) -> Self {
        let mut descriptor = Self::new(HttpMethod::Get, target);
        descriptor.query = query;
        descriptor
    }

    /// Creates a DELETE descriptor.
    #[must_use]
    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, target)
    }

    /// Creates a descriptor for a method with an optional payload.
    ///
    /// The payload is dropped for methods that carry no body.
    #[must_use]
    pub fn with_payload(
        method: HttpMethod,
        target: impl Into<String>,
        payload: Option<serde_json::Value>,
    ) -> Self {
        let mut descriptor = Self::new(method, target);
        if method.has_body() {
            descriptor.payload = payload;
        }
        descriptor
    }

    /// Unique identifier of this descriptor.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Target path or URL.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Query parameters (GET only).
    #[must_use]
    pub const fn query(&self) -> Option<&BTreeMap<String, String>> {
        self.query.as_ref()
    }

    /// Payload (POST/PUT/PATCH only).
    #[must_use]
    pub const fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }

    /// Registered assertions, in registration order.
    #[must_use]
    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Completion callbacks, in registration order.
    #[must_use]
    pub fn callbacks(&self) -> &[CompletionCallback] {
        &self.callbacks
    }

    /// Failures collected so far. Empty means every assertion held.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Appends an assertion; its callback, if any, joins the callback list.
    pub fn add_assertion(&mut self, mut assertion: Assertion) {
        if let Some(callback) = assertion.on_complete.take() {
            self.callbacks.push(callback);
        }
        self.assertions.push(assertion);
    }

    /// Appends a completion callback that is not tied to an assertion.
    pub fn add_callback(&mut self, callback: CompletionCallback) {
        self.callbacks.push(callback);
    }

    /// Records a failed assertion.
    pub fn record_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Builds the injection options for this descriptor, without session state.
    #[must_use]
    pub fn options(&self) -> RequestOptions {
        RequestOptions {
            method: self.method,
            url: self.target.clone(),
            query: self.query.clone(),
            payload: self.payload.clone(),
            ..RequestOptions::default()
        }
    }
}

impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("target", &self.target)
            .field("query", &self.query)
            .field("payload", &self.payload)
            .field("assertions", &self.assertions)
            .field("callbacks", &self.callbacks.len())
            .field("failures", &self.failures)
            .finish()
    }
}
