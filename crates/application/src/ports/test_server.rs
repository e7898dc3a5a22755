//! In-process server port

use async_trait::async_trait;
use tandem_domain::{InjectedResponse, RequestOptions};

use crate::ApplicationResult;

/// Port for the server a scenario runs against.
///
/// A fresh instance is created for every run. Requests never leave the
/// process: the server answers each injected request exactly once.
#[async_trait]
pub trait TestServer: Send + Sync + Sized + 'static {
    /// Creates a new, not yet prepared server instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance cannot be constructed.
    fn create() -> ApplicationResult<Self>;

    /// Injects a request and waits for its response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or delivered.
    async fn inject(&self, options: &RequestOptions) -> ApplicationResult<InjectedResponse>;
}
