//! Flash message utilities for server-to-client communication.
//!
//! Flash messages are short-lived messages stored in a signed cookie and shown
//! once on the next rendered user list, then cleared. Used for communicating
//! the outcome of a write across the redirect that follows it.

use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar, SignedCookieJar,
};
use serde::{Deserialize, Serialize};

/// Name of the cookie holding pending flash messages.
pub const FLASH_COOKIE: &str = "flash_messages";

/// Message category, doubling as the CSS class used to render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
        }
    }
}

/// Flash message structure stored in cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    /// Create a success flash message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Create a danger flash message.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

/// Decode the pending messages, ignoring a malformed cookie.
fn pending(jar: &SignedCookieJar) -> Vec<FlashMessage> {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return Vec::new();
    };

    urlencoding::decode(cookie.value())
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_else(|| {
            tracing::warn!("Discarding malformed flash cookie");
            Vec::new()
        })
}

/// Queue a message to be shown on the next rendered list page.
///
/// Cookie properties:
/// - Path: / (accessible from any page)
/// - SameSite: Lax (sent on navigation, not cross-site requests)
/// - HttpOnly (rendered server-side, never read by scripts)
pub fn push_flash(jar: SignedCookieJar, flash: FlashMessage) -> SignedCookieJar {
    let mut messages = pending(&jar);
    messages.push(flash);

    let json = serde_json::to_string(&messages).unwrap_or_default();
    let value = urlencoding::encode(&json).into_owned();

    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true),
    )
}

/// Take every pending message and clear the cookie.
///
/// `raw` is the unverified view of the same request cookies. The signed jar
/// drops a cookie whose signature does not match, so the unsigned jar is
/// what clears a tampered one.
pub fn take_flashes(
    jar: SignedCookieJar,
    raw: CookieJar,
) -> (SignedCookieJar, CookieJar, Vec<FlashMessage>) {
    if jar.get(FLASH_COOKIE).is_none() {
        if raw.get(FLASH_COOKIE).is_none() {
            return (jar, raw, Vec::new());
        }

        tracing::warn!("Clearing flash cookie with an invalid signature");
        let raw = raw.remove(Cookie::build(FLASH_COOKIE).path("/"));
        return (jar, raw, Vec::new());
    }

    let messages = pending(&jar);

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, raw, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{
            header::{COOKIE, SET_COOKIE},
            HeaderMap, HeaderValue,
        },
        response::IntoResponse,
    };
    use axum_extra::extract::cookie::Key;

    const FORGED: &str =
        "flash_messages=%5B%7B%22level%22%3A%22success%22%2C%22message%22%3A%22forged%22%7D%5D";

    fn key() -> Key {
        Key::derive_from(b"flash-test-secret-that-is-long-enough")
    }

    /// The `Set-Cookie` headers both jars would send.
    fn set_cookies(jar: SignedCookieJar, raw: CookieJar) -> Vec<String> {
        let response = (jar, raw, ()).into_response();
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_flash_levels() {
        assert_eq!(FlashMessage::success("Saved").level.as_str(), "success");
        assert_eq!(FlashMessage::danger("Failed").level.as_str(), "danger");
    }

    #[test]
    fn test_take_returns_pushed_messages_in_order() {
        let jar = SignedCookieJar::new(key());
        let jar = push_flash(jar, FlashMessage::danger("Failed to save user"));
        let jar = push_flash(jar, FlashMessage::success("User created"));

        let (jar, _, messages) = take_flashes(jar, CookieJar::new());

        assert_eq!(
            messages,
            vec![
                FlashMessage::danger("Failed to save user"),
                FlashMessage::success("User created"),
            ]
        );
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_take_without_cookie_is_empty() {
        let (jar, raw, messages) = take_flashes(SignedCookieJar::new(key()), CookieJar::new());
        assert!(messages.is_empty());
        assert!(set_cookies(jar, raw).is_empty());
    }

    #[test]
    fn test_unsigned_cookie_is_ignored_and_cleared() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(FORGED));
        let jar = SignedCookieJar::from_headers(&headers, key());
        let raw = CookieJar::from_headers(&headers);

        let (jar, raw, messages) = take_flashes(jar, raw);

        assert!(messages.is_empty());
        let cookies = set_cookies(jar, raw);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("flash_messages=;"));
        assert!(cookies[0].contains("Max-Age=0"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&FlashMessage::success("User created")).unwrap();
        assert_eq!(json, r#"{"level":"success","message":"User created"}"#);
    }
}
