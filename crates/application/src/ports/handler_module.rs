//! Handler module port

use async_trait::async_trait;

use crate::ApplicationResult;

/// Name and version a module is registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Registration name (`plugin{index}`).
    pub name: String,
    /// Registration version.
    pub version: String,
}

impl Registration {
    /// Registration for the module at `index` in the scenario's module list.
    #[must_use]
    pub fn indexed(index: usize) -> Self {
        Self {
            name: format!("plugin{index}"),
            version: "0.0.1".to_string(),
        }
    }
}

/// A pluggable set of request handlers installed on a server at bootstrap.
///
/// Registration completes when the returned future resolves; the next
/// module is not registered before that.
#[async_trait]
pub trait HandlerModule<S>: Send + Sync {
    /// Installs this module's handlers on `server`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handlers cannot be installed.
    async fn register(&self, server: &mut S, registration: &Registration) -> ApplicationResult<()>;
}

/// Adapts a closure into a [`HandlerModule`].
pub struct FnModule<F> {
    register: F,
}

impl<F> FnModule<F> {
    /// Wraps `register`.
    pub const fn new(register: F) -> Self {
        Self { register }
    }
}

#[async_trait]
impl<S, F> HandlerModule<S> for FnModule<F>
where
    S: Send,
    F: Fn(&mut S) -> ApplicationResult<()> + Send + Sync,
{
    async fn register(&self, server: &mut S, _registration: &Registration) -> ApplicationResult<()> {
        (self.register)(server)
    }
}
