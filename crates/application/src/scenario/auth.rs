//! Login helper.
//!
//! Posts credentials to the configured login path and, when the server
//! answers with a session cookie, stores it in the session so every later
//! request in the run carries it.

use serde_json::json;
use tandem_domain::{
    Assertion, HttpMethod, RequestDescriptor, ScenarioSettings, extract_session_token,
    session_cookie,
};
use tracing::debug;

use super::{RequestHandle, Scenario};
use crate::ports::TestServer;

impl<S: TestServer> Scenario<S> {
    /// Queues a login request whose response establishes the session.
    pub fn auth(&mut self, username: &str, password: &str) -> RequestHandle<'_, S> {
        let payload = json!({ "username": username, "password": password });
        let descriptor = RequestDescriptor::with_payload(
            HttpMethod::Post,
            self.settings.login_path.clone(),
            Some(payload),
        );
        let assertion = login_assertion(&self.settings);
        self.add_request(descriptor).assert(assertion)
    }
}

/// Builds the assertion that turns a login response into session state.
///
/// A 401 leaves the session untouched and is reported unless
/// `fail_on_unauthorized` is off. Any other status must carry a
/// `set-cookie` header with a session token.
#[must_use]
pub fn login_assertion(settings: &ScenarioSettings) -> Assertion {
    let cookie_name = settings.session_cookie.clone();
    let fail_on_unauthorized = settings.fail_on_unauthorized;

    Assertion::session("login establishes a session", move |response, session| {
        if response.status == 401 {
            return fail_on_unauthorized
                .then(|| "the login was rejected with status code: 401".to_string());
        }

        let Some(set_cookie) = response.header("set-cookie") else {
            return Some("the login response has no set-cookie header".to_string());
        };
        let Some(token) = extract_session_token(set_cookie) else {
            return Some(format!("no session token in set-cookie header: {set_cookie}"));
        };

        debug!(cookie = %cookie_name, "session established from login response");
        session.set_header("cookie", session_cookie(&cookie_name, &token));
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tandem_domain::{Headers, InjectedResponse, SessionState};

    use crate::evaluator::evaluate;
    use crate::scenario::test_support::MockServer;

    fn login_response(status: u16, set_cookie: Option<&str>) -> InjectedResponse {
        let mut headers = Headers::new();
        if let Some(value) = set_cookie {
            headers.append("set-cookie", value);
        }
        InjectedResponse::new(status, headers, Vec::new(), Duration::ZERO)
    }

    #[test]
    fn test_auth_queues_login_post() {
        let mut scenario: Scenario<MockServer> = Scenario::new(Vec::new());
        scenario.auth("ada", "secret");

        let login = &scenario.requests()[0];
        assert_eq!(login.method(), HttpMethod::Post);
        assert_eq!(login.target(), "/login");
        assert_eq!(
            login.payload(),
            Some(&json!({"username": "ada", "password": "secret"}))
        );
        assert_eq!(login.assertions().len(), 1);
    }

    #[test]
    fn test_auth_uses_configured_login_path() {
        let mut scenario: Scenario<MockServer> = Scenario::new(Vec::new())
            .with_settings(ScenarioSettings::default().with_login_path("/api/session"));
        scenario.auth("ada", "secret");
        assert_eq!(scenario.requests()[0].target(), "/api/session");
    }

    #[test]
    fn test_successful_login_sets_cookie() {
        let assertion = login_assertion(&ScenarioSettings::default());
        let mut session = SessionState::new();
        let response = login_response(200, Some("sid=Fe26.2**tok; Path=/; HttpOnly"));

        assert_eq!(evaluate(&assertion, &response, &mut session), None);
        assert_eq!(session.header("cookie"), Some("session=Fe26.2**tok"));
    }

    #[test]
    fn test_only_first_set_cookie_is_used() {
        let assertion = login_assertion(&ScenarioSettings::default());
        let mut session = SessionState::new();
        let mut response = login_response(200, Some("sid=first"));
        response.headers.append("set-cookie", "other=second");

        assert_eq!(evaluate(&assertion, &response, &mut session), None);
        assert_eq!(session.header("cookie"), Some("session=first"));
    }

    #[test]
    fn test_unauthorized_fails_and_leaves_session() {
        let assertion = login_assertion(&ScenarioSettings::default());
        let mut session = SessionState::new();

        let failure = evaluate(&assertion, &login_response(401, None), &mut session);
        assert_eq!(
            failure.map(|f| f.message),
            Some("the login was rejected with status code: 401".to_string())
        );
        assert!(session.is_empty());
    }

    #[test]
    fn test_unauthorized_can_be_silenced() {
        let settings = ScenarioSettings::default().with_fail_on_unauthorized(false);
        let assertion = login_assertion(&settings);
        let mut session = SessionState::new();

        assert_eq!(evaluate(&assertion, &login_response(401, None), &mut session), None);
        assert!(session.is_empty());
    }

    #[test]
    fn test_missing_set_cookie_is_reported() {
        let assertion = login_assertion(&ScenarioSettings::default());
        let mut session = SessionState::new();

        let failure = evaluate(&assertion, &login_response(200, None), &mut session);
        assert!(failure.is_some_and(|f| f.message.contains("no set-cookie")));
        assert!(session.is_empty());
    }

    #[test]
    fn test_custom_cookie_name() {
        let settings = ScenarioSettings::default().with_session_cookie("sid");
        let assertion = login_assertion(&settings);
        let mut session = SessionState::new();

        assert_eq!(evaluate(&assertion, &login_response(200, Some("sid=abc")), &mut session), None);
        assert_eq!(session.header("cookie"), Some("sid=abc"));
    }
}
