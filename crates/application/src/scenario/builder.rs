//! Scenario builder

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tandem_domain::{HttpMethod, RequestDescriptor, ScenarioSettings, SessionState};

use super::RequestHandle;
use crate::ports::{HandlerModule, TestServer};

/// Hook invoked with the raw server before any handler module is registered.
pub type BeforeHook<S> = Arc<dyn Fn(&mut S) + Send + Sync>;

/// Options applied while bootstrapping the server for a run.
pub struct BootstrapOptions<S> {
    /// Pre-registration setup hook.
    pub before: Option<BeforeHook<S>>,
}

impl<S> BootstrapOptions<S> {
    /// Options with a pre-registration hook.
    #[must_use]
    pub fn before<F>(hook: F) -> Self
    where
        F: Fn(&mut S) + Send + Sync + 'static,
    {
        Self {
            before: Some(Arc::new(hook)),
        }
    }
}

impl<S> Default for BootstrapOptions<S> {
    fn default() -> Self {
        Self { before: None }
    }
}

impl<S> Clone for BootstrapOptions<S> {
    fn clone(&self) -> Self {
        Self {
            before: self.before.clone(),
        }
    }
}

/// An ordered sequence of requests to run against an in-process server.
///
/// Handler modules are fixed at construction. Nothing executes until
/// [`Scenario::run`] is called. Session state persists across runs of the
/// same scenario until [`Scenario::reset_session`] is called; so do the
/// failures collected on each request.
pub struct Scenario<S: TestServer> {
    pub(super) modules: Vec<Arc<dyn HandlerModule<S>>>,
    pub(super) options: BootstrapOptions<S>,
    pub(super) settings: ScenarioSettings,
    pub(super) requests: Vec<RequestDescriptor>,
    pub(super) session: SessionState,
}

impl<S: TestServer> Scenario<S> {
    /// Creates a scenario over an ordered list of handler modules.
    #[must_use]
    pub fn new<I>(modules: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn HandlerModule<S>>>,
    {
        Self {
            modules: modules.into_iter().collect(),
            options: BootstrapOptions::default(),
            settings: ScenarioSettings::default(),
            requests: Vec::new(),
            session: SessionState::new(),
        }
    }

    /// Creates a scenario over a single handler module.
    #[must_use]
    pub fn with_module<M>(module: M) -> Self
    where
        M: HandlerModule<S> + 'static,
    {
        Self::new([Arc::new(module) as Arc<dyn HandlerModule<S>>])
    }

    /// Sets the bootstrap options.
    #[must_use]
    pub fn with_options(mut self, options: BootstrapOptions<S>) -> Self {
        self.options = options;
        self
    }

    /// Sets the pre-registration hook.
    #[must_use]
    pub fn before<F>(self, hook: F) -> Self
    where
        F: Fn(&mut S) + Send + Sync + 'static,
    {
        self.with_options(BootstrapOptions::before(hook))
    }

    /// Sets the scenario settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ScenarioSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the scenario settings.
    #[must_use]
    pub const fn settings(&self) -> &ScenarioSettings {
        &self.settings
    }

    /// Queues a descriptor and returns the handle for attaching assertions to it.
    pub fn add_request(&mut self, descriptor: RequestDescriptor) -> RequestHandle<'_, S> {
        self.requests.push(descriptor);
        let index = self.requests.len() - 1;
        RequestHandle::new(self, index)
    }

    /// Queues a GET request.
    pub fn get(&mut self, target: impl Into<String>) -> RequestHandle<'_, S> {
        self.add_request(RequestDescriptor::get(target, None))
    }

    /// Queues a GET request with query parameters.
    pub fn get_with_query<I, K, V>(&mut self, target: impl Into<String>, query: I) -> RequestHandle<'_, S>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let query: BTreeMap<String, String> = query
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.add_request(RequestDescriptor::get(target, Some(query)))
    }

    /// Queues a POST request.
    pub fn post(
        &mut self,
        target: impl Into<String>,
        payload: impl Into<Option<serde_json::Value>>,
    ) -> RequestHandle<'_, S> {
        self.add_request(RequestDescriptor::with_payload(
            HttpMethod::Post,
            target,
            payload.into(),
        ))
    }

    /// Queues a PUT request.
    pub fn put(
        &mut self,
        target: impl Into<String>,
        payload: impl Into<Option<serde_json::Value>>,
    ) -> RequestHandle<'_, S> {
        self.add_request(RequestDescriptor::with_payload(
            HttpMethod::Put,
            target,
            payload.into(),
        ))
    }

    /// Queues a PATCH request.
    pub fn patch(
        &mut self,
        target: impl Into<String>,
        payload: impl Into<Option<serde_json::Value>>,
    ) -> RequestHandle<'_, S> {
        self.add_request(RequestDescriptor::with_payload(
            HttpMethod::Patch,
            target,
            payload.into(),
        ))
    }

    /// Queues a DELETE request.
    pub fn delete(&mut self, target: impl Into<String>) -> RequestHandle<'_, S> {
        self.add_request(RequestDescriptor::delete(target))
    }

    /// Queued requests, in execution order.
    #[must_use]
    pub fn requests(&self) -> &[RequestDescriptor] {
        &self.requests
    }

    /// Number of queued requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Drops every carried-over session value.
    pub fn reset_session(&mut self) {
        self.session.clear();
    }
}

impl<S: TestServer> fmt::Debug for Scenario<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("modules", &self.modules.len())
            .field("has_before_hook", &self.options.before.is_some())
            .field("settings", &self.settings)
            .field("requests", &self.requests)
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::test_support::MockServer;
    use pretty_assertions::assert_eq;

    fn scenario() -> Scenario<MockServer> {
        Scenario::new(Vec::new())
    }

    #[test]
    fn test_requests_queue_in_order() {
        let mut scenario = scenario();
        scenario
            .get("/a")
            .post("/b", serde_json::json!({"x": 1}))
            .put("/c", None)
            .patch("/d", serde_json::json!({"y": 2}))
            .delete("/e");

        let plan: Vec<(HttpMethod, &str)> = scenario
            .requests()
            .iter()
            .map(|r| (r.method(), r.target()))
            .collect();
        assert_eq!(
            plan,
            vec![
                (HttpMethod::Get, "/a"),
                (HttpMethod::Post, "/b"),
                (HttpMethod::Put, "/c"),
                (HttpMethod::Patch, "/d"),
                (HttpMethod::Delete, "/e"),
            ]
        );
        assert_eq!(scenario.requests()[2].payload(), None);
    }

    #[test]
    fn test_get_with_query() {
        let mut scenario = scenario();
        scenario.get_with_query("/search", [("q", "rust"), ("page", "1")]);

        let query = scenario.requests()[0].query().cloned().unwrap_or_default();
        assert_eq!(query.get("q").map(String::as_str), Some("rust"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_nothing_runs_while_building() {
        let mut scenario = scenario();
        scenario.get("/").expect_status(200);
        assert!(scenario.requests()[0].failures().is_empty());
        assert!(scenario.session().is_empty());
    }

    #[test]
    fn test_reset_session() {
        let mut scenario = scenario();
        scenario.session.set_header("cookie", "session=x");
        scenario.reset_session();
        assert!(scenario.session().is_empty());
    }
}
