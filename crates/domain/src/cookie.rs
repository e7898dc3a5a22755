//! Session cookie extraction.
//!
//! Login responses hand out their session through `set-cookie`. The token
//! is pulled out with the RFC 6265 cookie-pair grammar: a token name,
//! optional whitespace, `=`, and a value that stops at control characters,
//! `"`, `,`, `;`, `\` or DEL.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static COOKIE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:[^\x00-\x20()<>@,;:\\"/\[\]?={}\x7F]+)\s*=\s*([^\x00-\x20",;\\\x7F]*)"#)
        .expect("cookie pair grammar is a valid regex")
});

/// Extracts the value of the first cookie pair in a `set-cookie` header.
///
/// Returns `None` when the header holds no `name=value` pair.
#[must_use]
pub fn extract_session_token(set_cookie: &str) -> Option<String> {
    COOKIE_PAIR
        .captures(set_cookie)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().to_string())
}

/// Renders a `cookie` request header value for the given session token.
#[must_use]
pub fn session_cookie(name: &str, token: &str) -> String {
    format!("{name}={token}")
}
