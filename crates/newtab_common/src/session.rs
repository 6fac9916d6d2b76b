//! Cookie-backed session handling.
//!
//! The only authentication signal is the refresh-token cookie. Nothing about
//! the session is kept on the server.

use cookie::{time::Duration as CookieDuration, Cookie};
use http::{header, HeaderMap};
use newtab_config::AppConfig;
use sha2::{Digest, Sha256};

/// Name of the refresh-token cookie unless configured otherwise.
pub const SESSION_COOKIE: &str = "google_refresh_token";

/// Reads a non-empty cookie value from the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// The refresh token of the current request, if any.
pub fn refresh_token(headers: &HeaderMap, config: &AppConfig) -> Option<String> {
    cookie_value(headers, &config.session.cookie_name)
}

/// Builds the `Set-Cookie` value that stores a refresh token.
pub fn session_cookie(config: &AppConfig, refresh_token: &str) -> Cookie<'static> {
    Cookie::build((config.session.cookie_name.clone(), refresh_token.to_string()))
        .http_only(true)
        .secure(config.secure_cookies())
        .path("/")
        .max_age(CookieDuration::seconds(config.session.max_age_secs))
        .build()
}

/// Stable storage key for a session: hex SHA-256 of the refresh token.
pub fn session_key(refresh_token: &str) -> String {
    hex::encode(Sha256::digest(refresh_token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_cookie_value_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; google_refresh_token=rt1; other=x"),
        );
        assert_eq!(
            cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("rt1")
        );
    }

    #[test]
    fn test_missing_or_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        assert!(cookie_value(&headers, SESSION_COOKIE).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("google_refresh_token="));
        assert!(cookie_value(&headers, SESSION_COOKIE).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = AppConfig::default();
        let rendered = session_cookie(&config, "rt1").to_string();

        assert!(rendered.starts_with("google_refresh_token=rt1"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=31536000"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        let config = AppConfig {
            run_env: "production".to_string(),
            ..AppConfig::default()
        };
        assert!(session_cookie(&config, "rt1").to_string().contains("Secure"));
    }

    #[test]
    fn test_session_key_is_stable_and_opaque() {
        let key = session_key("rt1");
        assert_eq!(key, session_key("rt1"));
        assert_ne!(key, session_key("rt2"));
        assert_eq!(key.len(), 64);
        assert!(!key.contains("rt1"));
    }
}
