/**
 * Session Cookie Helpers
 *
 * Builds the `Set-Cookie` values that install and remove the session token,
 * and reads cookies back out of request headers.
 */

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};

/// Name of the cookie carrying the session JWT
pub const SESSION_COOKIE: &str = "session_token";

/// `Set-Cookie` value that installs a session token
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that clears the session token
pub fn removal_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Headers map carrying a single `Set-Cookie`
pub fn set_cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.insert(SET_COOKIE, value);
        }
        Err(e) => tracing::error!("Refusing to emit malformed Set-Cookie header: {:?}", e),
    }
    headers
}

/// Read a cookie value from the `Cookie` request header(s)
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
