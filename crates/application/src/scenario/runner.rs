//! Scenario execution

use tandem_domain::{Failure, InjectedResponse};
use tracing::{debug, info, warn};

use super::{RequestOutcome, RunReport, Scenario};
use crate::evaluator::evaluate_all;
use crate::ports::{Registration, TestServer};
use crate::{ApplicationError, ApplicationResult};

impl<S: TestServer> Scenario<S> {
    /// Bootstraps a fresh server and runs every queued request in order.
    ///
    /// Each request waits for the previous one to be answered and evaluated.
    /// Session headers are merged into each request right before it is
    /// injected, so values set while evaluating request `n` reach request
    /// `n + 1`. Per-request callbacks fire as soon as their request has been
    /// evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::EmptyScenario`] if nothing is queued, and
    /// propagates bootstrap, registration and injection errors unchanged.
    /// Assertion failures are not errors; they are in the report.
    pub async fn run(&mut self) -> ApplicationResult<RunReport> {
        if self.requests.is_empty() {
            return Err(ApplicationError::EmptyScenario);
        }

        let server = self.bootstrap().await?;
        info!(requests = self.requests.len(), "running scenario");

        let mut outcomes = Vec::with_capacity(self.requests.len());
        let mut last_response = None;

        for descriptor in &mut self.requests {
            let options = descriptor.options().merged_with(&self.session);
            debug!(method = %options.method, url = %options.url, "injecting request");

            let response = server.inject(&options).await?;
            debug!(status = %response.status_code(), url = %options.url, "response received");

            for failure in evaluate_all(descriptor.assertions(), &response, &mut self.session) {
                warn!(url = %options.url, failure = %failure, "assertion failed");
                descriptor.record_failure(failure);
            }

            for callback in descriptor.callbacks() {
                callback(&response, descriptor.failures());
            }

            outcomes.push(RequestOutcome::new(descriptor, &response));
            last_response = Some(response);
        }

        let response = last_response.ok_or(ApplicationError::EmptyScenario)?;
        let failures = outcomes
            .last()
            .map(|outcome| outcome.failures.clone())
            .unwrap_or_default();

        let report = RunReport {
            response,
            failures,
            requests: outcomes,
        };
        info!(
            requests = report.requests.len(),
            failures = report.total_failures(),
            "scenario finished"
        );
        Ok(report)
    }

    /// Runs the scenario and hands the last response and its failures to `callback`.
    ///
    /// # Errors
    ///
    /// See [`Scenario::run`]. The callback is not invoked when the run errors.
    pub async fn run_with<F>(&mut self, callback: F) -> ApplicationResult<RunReport>
    where
        F: FnOnce(&InjectedResponse, &[Failure]),
    {
        let report = self.run().await?;
        callback(&report.response, &report.failures);
        Ok(report)
    }

    /// Creates the server, applies the pre-registration hook, then registers
    /// every handler module in order, each one after the previous completed.
    async fn bootstrap(&self) -> ApplicationResult<S> {
        let mut server = S::create()?;

        if let Some(before) = &self.options.before {
            before(&mut server);
        }

        for (index, module) in self.modules.iter().enumerate() {
            let registration = Registration::indexed(index);
            module
                .register(&mut server, &registration)
                .await
                .map_err(|e| ApplicationError::Registration {
                    module: registration.name.clone(),
                    reason: e.to_string(),
                })?;
            debug!(module = %registration.name, version = %registration.version, "handler module registered");
        }

        Ok(server)
    }
}
