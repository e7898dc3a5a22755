//! Assertion evaluation.
//!
//! Runs a request's assertions against its response, in registration order,
//! and turns every assertion that does not hold into a [`Failure`].

use regex::Regex;
use serde_json::Value;
use tandem_domain::{Assertion, AssertionKind, Failure, InjectedResponse, SessionState};

/// Evaluates every assertion against `response` and returns the failures.
///
/// All assertions run; a failure does not stop the ones after it.
#[must_use]
pub fn evaluate_all(
    assertions: &[Assertion],
    response: &InjectedResponse,
    session: &mut SessionState,
) -> Vec<Failure> {
    assertions
        .iter()
        .filter_map(|assertion| evaluate(assertion, response, session))
        .collect()
}

/// Evaluates a single assertion. Returns `None` when it holds.
#[must_use]
pub fn evaluate(
    assertion: &Assertion,
    response: &InjectedResponse,
    session: &mut SessionState,
) -> Option<Failure> {
    let message = match &assertion.kind {
        AssertionKind::StatusCode { expected } => check_status_code(response, *expected),
        AssertionKind::HeaderMatches { name, pattern } => {
            check_header_matches(response, name, pattern)
        }
        AssertionKind::BodyContains { text } => check_body_contains(response, text),
        AssertionKind::JsonPath { path, expected } => check_json_path(response, path, expected),
        AssertionKind::Predicate { description, check } => {
            (!check(response)).then(|| format!("{description} did not hold"))
        }
        AssertionKind::Session { hook, .. } => hook(response, session),
    }?;

    Some(Failure::new(assertion.description(), message))
}

fn check_status_code(response: &InjectedResponse, expected: u16) -> Option<String> {
    (response.status != expected).then(|| {
        format!(
            "the status code is: {} but should be: {}",
            response.status, expected
        )
    })
}

fn check_header_matches(response: &InjectedResponse, name: &str, pattern: &str) -> Option<String> {
    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => return Some(format!("invalid pattern '{pattern}': {e}")),
    };

    match response.header(name) {
        Some(actual) if regex.is_match(actual) => None,
        Some(actual) => Some(format!(
            "the header {name} is: {actual} but should match: {pattern}"
        )),
        None => Some(format!(
            "the header {name} is missing but should match: {pattern}"
        )),
    }
}

fn check_body_contains(response: &InjectedResponse, text: &str) -> Option<String> {
    if response.payload.contains(text) {
        return None;
    }
    let preview = if response.payload.chars().count() > 100 {
        format!("{}...", response.payload.chars().take(100).collect::<String>())
    } else {
        response.payload.clone()
    };
    Some(format!("the body does not contain: {text} (body: {preview})"))
}

fn check_json_path(response: &InjectedResponse, path: &str, expected: &Value) -> Option<String> {
    let json = match serde_json::from_str::<Value>(&response.payload) {
        Ok(json) => json,
        Err(e) => return Some(format!("the body is not valid JSON: {e}")),
    };

    match query_json_path(&json, path) {
        Ok(Some(actual)) if actual == expected => None,
        Ok(Some(actual)) => Some(format!(
            "the JSON path {path} is: {actual} but should be: {expected}"
        )),
        Ok(None) => Some(format!("the JSON path {path} is missing")),
        Err(e) => Some(format!("invalid JSON path '{path}': {e}")),
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0]
fn query_json_path<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let Some(path) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    let path = path.strip_prefix('.').unwrap_or(path);

    let mut current = json;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let (name, index) = match segment.split_once('[') {
            Some((name, rest)) => {
                let index = rest
                    .strip_suffix(']')
                    .ok_or_else(|| format!("Unclosed bracket in segment: {segment}"))?;
                let index: usize = index
                    .parse()
                    .map_err(|_| format!("Invalid array index: {index}"))?;
                (name, Some(index))
            }
            None => (segment, None),
        };

        if !name.is_empty() {
            current = match current.get(name) {
                Some(value) => value,
                None => return Ok(None),
            };
        }
        if let Some(index) = index {
            current = match current.get(index) {
                Some(value) => value,
                None => return Ok(None),
            };
        }
    }

    Ok(Some(current))
}
