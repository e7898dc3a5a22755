//! Scenario Settings
//!
//! Knobs for the login helper and session carry-over.

use serde::{Deserialize, Serialize};

/// Settings shared by every scenario built from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Path the login helper posts credentials to.
    pub login_path: String,
    /// Cookie name the extracted session token is sent back under.
    pub session_cookie: String,
    /// Whether a 401 login response is collected as a failure.
    pub fail_on_unauthorized: bool,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            session_cookie: "session".to_string(),
            fail_on_unauthorized: true,
        }
    }
}

impl ScenarioSettings {
    /// Sets the login path.
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Sets the session cookie name.
    #[must_use]
    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    /// Sets whether rejected logins are reported.
    #[must_use]
    pub const fn with_fail_on_unauthorized(mut self, fail: bool) -> Self {
        self.fail_on_unauthorized = fail;
        self
    }
}
