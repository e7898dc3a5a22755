//! Run results

use std::time::Duration;

use tandem_domain::{Failure, HttpMethod, InjectedResponse, RequestDescriptor};
use uuid::Uuid;

/// What happened to one request during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    /// Descriptor identifier.
    pub id: Uuid,
    /// HTTP method.
    pub method: HttpMethod,
    /// Target path or URL.
    pub target: String,
    /// Response status.
    pub status: u16,
    /// Failures collected on the request so far.
    pub failures: Vec<Failure>,
    /// Time spent inside the server.
    pub duration: Duration,
}

impl RequestOutcome {
    pub(super) fn new(descriptor: &RequestDescriptor, response: &InjectedResponse) -> Self {
        Self {
            id: descriptor.id(),
            method: descriptor.method(),
            target: descriptor.target().to_string(),
            status: response.status,
            failures: descriptor.failures().to_vec(),
            duration: response.duration,
        }
    }

    /// Returns true if no assertion failed on this request.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of one full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Response of the last request.
    pub response: InjectedResponse,
    /// Failures of the last request.
    pub failures: Vec<Failure>,
    /// Every request in execution order.
    pub requests: Vec<RequestOutcome>,
}

impl RunReport {
    /// Returns true if no request collected a failure.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.requests.iter().all(RequestOutcome::passed)
    }

    /// Requests that collected at least one failure.
    pub fn failed_requests(&self) -> impl Iterator<Item = &RequestOutcome> {
        self.requests.iter().filter(|r| !r.passed())
    }

    /// Total number of failures across all requests.
    #[must_use]
    pub fn total_failures(&self) -> usize {
        self.requests.iter().map(|r| r.failures.len()).sum()
    }
}
