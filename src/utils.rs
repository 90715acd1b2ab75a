use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use http::header::{HeaderMap, SET_COOKIE};
use std::time::Duration;

use crate::config::SESSION_COOKIE_NAME;

pub(crate) fn base64url_decode(input: &str) -> Result<Vec<u8>, UtilError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| UtilError::Format("Failed to decode base64url".to_string()))?;
    Ok(decoded)
}

/// Shared HTTP client for backend calls.
///
/// - `timeout`: 30 seconds, so a hanging request cannot block the console
///   indefinitely.
/// - `pool_idle_timeout` / `pool_max_idle_per_host`: defaults tuned for a
///   handful of parallel admin calls against a single host.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .expect("Failed to create reqwest client")
}

/// Mirror the session token into the HTTP-only cookie used by
/// server-rendered routes.
pub fn header_set_session_cookie<'a>(
    headers: &'a mut HeaderMap,
    token: &str,
    max_age: i64,
) -> Result<&'a HeaderMap, UtilError> {
    header_set_cookie(headers, SESSION_COOKIE_NAME.as_str(), token, max_age)
}

/// Clear the mirrored session cookie by setting `Max-Age=0`.
pub fn header_clear_session_cookie(headers: &mut HeaderMap) -> Result<&HeaderMap, UtilError> {
    header_set_cookie(headers, SESSION_COOKIE_NAME.as_str(), "", 0)
}

fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    name: &str,
    value: &str,
    max_age: i64,
) -> Result<&'a HeaderMap, UtilError> {
    let cookie =
        format!("{name}={value}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={max_age}");
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(headers)
}

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Invalid format: {0}")]
    Format(String),
}
