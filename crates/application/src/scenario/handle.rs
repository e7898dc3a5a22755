//! Handle to a queued request

use std::sync::Arc;

use tandem_domain::{Assertion, Failure, InjectedResponse, RequestDescriptor, SessionState};
use uuid::Uuid;

use super::{RunReport, Scenario};
use crate::ApplicationResult;
use crate::ports::TestServer;

/// Handle to one queued request.
///
/// Assertions added through a handle always land on the request the handle
/// was created for, no matter what was queued since. Request-adding calls
/// are forwarded to the scenario so chains read top to bottom.
pub struct RequestHandle<'a, S: TestServer> {
    scenario: &'a mut Scenario<S>,
    index: usize,
}

impl<'a, S: TestServer> RequestHandle<'a, S> {
    pub(super) fn new(scenario: &'a mut Scenario<S>, index: usize) -> Self {
        Self { scenario, index }
    }

    fn descriptor_mut(&mut self) -> &mut RequestDescriptor {
        &mut self.scenario.requests[self.index]
    }

    /// The request this handle points at.
    #[must_use]
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.scenario.requests[self.index]
    }

    /// Identifier of the request this handle points at.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.descriptor().id()
    }

    /// Attaches an assertion (and its callback, if any) to this request.
    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.descriptor_mut().add_assertion(assertion);
        self
    }

    /// Expects an exact status code.
    pub fn expect_status(self, expected: u16) -> Self {
        self.assert(Assertion::status(expected))
    }

    /// Expects a response header to match a regex pattern.
    pub fn expect_header(self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.assert(Assertion::header(name, pattern))
    }

    /// Expects the response body to contain some text.
    pub fn expect_body_contains(self, text: impl Into<String>) -> Self {
        self.assert(Assertion::body_contains(text))
    }

    /// Expects a JSON body value at `path`.
    pub fn expect_json(self, path: impl Into<String>, expected: serde_json::Value) -> Self {
        self.assert(Assertion::json_path(path, expected))
    }

    /// Expects a custom predicate to return `true`.
    pub fn expect<F>(self, check: F) -> Self
    where
        F: Fn(&InjectedResponse) -> bool + Send + Sync + 'static,
    {
        self.assert(Assertion::predicate(check))
    }

    /// Runs a check that may update the session for later requests.
    pub fn expect_session<F>(self, description: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&InjectedResponse, &mut SessionState) -> Option<String> + Send + Sync + 'static,
    {
        self.assert(Assertion::session(description, hook))
    }

    /// Registers a callback fired with this request's response and failures.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&InjectedResponse, &[Failure]) + Send + Sync + 'static,
    {
        self.descriptor_mut().add_callback(Arc::new(callback));
        self
    }

    /// Queues a GET request after this one.
    pub fn get(self, target: impl Into<String>) -> RequestHandle<'a, S> {
        self.scenario.get(target)
    }

    /// Queues a GET request with query parameters after this one.
    pub fn get_with_query<I, K, V>(self, target: impl Into<String>, query: I) -> RequestHandle<'a, S>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.scenario.get_with_query(target, query)
    }

    /// Queues a POST request after this one.
    pub fn post(
        self,
        target: impl Into<String>,
        payload: impl Into<Option<serde_json::Value>>,
    ) -> RequestHandle<'a, S> {
        self.scenario.post(target, payload)
    }

    /// Queues a PUT request after this one.
    pub fn put(
        self,
        target: impl Into<String>,
        payload: impl Into<Option<serde_json::Value>>,
    ) -> RequestHandle<'a, S> {
        self.scenario.put(target, payload)
    }

    /// Queues a PATCH request after this one.
    pub fn patch(
        self,
        target: impl Into<String>,
        payload: impl Into<Option<serde_json::Value>>,
    ) -> RequestHandle<'a, S> {
        self.scenario.patch(target, payload)
    }

    /// Queues a DELETE request after this one.
    pub fn delete(self, target: impl Into<String>) -> RequestHandle<'a, S> {
        self.scenario.delete(target)
    }

    /// Queues a login request after this one.
    pub fn auth(self, username: &str, password: &str) -> RequestHandle<'a, S> {
        self.scenario.auth(username, password)
    }

    /// Releases the handle and returns the scenario.
    pub fn done(self) -> &'a mut Scenario<S> {
        self.scenario
    }

    /// Runs the whole scenario.
    ///
    /// # Errors
    ///
    /// See [`Scenario::run`].
    pub async fn run(self) -> ApplicationResult<RunReport> {
        self.scenario.run().await
    }
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;
    use crate::scenario::test_support::MockServer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assertions_target_their_own_request() {
        let mut scenario: Scenario<MockServer> = Scenario::new(Vec::new());
        let first = scenario.get("/first").expect_status(200).done().len() - 1;
        scenario.get("/second");

        assert_eq!(first, 0);
        assert_eq!(scenario.requests()[0].assertions().len(), 1);
        assert!(scenario.requests()[1].assertions().is_empty());
    }

    #[test]
    fn test_multiple_assertions_per_request() {
        let mut scenario: Scenario<MockServer> = Scenario::new(Vec::new());
        scenario
            .get("/")
            .expect_status(200)
            .expect_header("content-type", "json")
            .expect(|res| res.status < 500)
            .on_complete(|_, _| {});

        let descriptor = &scenario.requests()[0];
        assert_eq!(descriptor.assertions().len(), 3);
        assert_eq!(descriptor.callbacks().len(), 1);
    }

    #[test]
    fn test_handle_exposes_descriptor() {
        let mut scenario: Scenario<MockServer> = Scenario::new(Vec::new());
        let handle = scenario.delete("/users/9");
        let id = handle.id();
        assert_eq!(handle.descriptor().target(), "/users/9");
        assert_eq!(scenario.requests()[0].id(), id);
    }
}
