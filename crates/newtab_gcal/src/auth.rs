// File: crates/newtab_gcal/src/auth.rs
use newtab_config::{GoogleConfig, DEFAULT_BASE_URL};

use crate::logic::GcalError;

/// Read-only calendar events plus the app-data folder of Drive.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/calendar.events.readonly",
    "https://www.googleapis.com/auth/drive.appdata",
];

pub const CALLBACK_PATH: &str = "/api/auth/callback";

/// OAuth2 client configuration for the Google identity provider.
///
/// Building one has no side effects. Missing credentials are only reported
/// when a token exchange is attempted.
#[derive(Debug, Clone)]
pub struct GoogleAuthClient {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub calendar_api_base: String,
}

impl GoogleAuthClient {
    pub fn from_config(config: &GoogleConfig) -> Self {
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: redirect_uri(base_url),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
            calendar_api_base: config.calendar_api_base.clone(),
        }
    }

    /// Consent-screen URL: offline access, both scopes, forced consent so a
    /// refresh token is issued again on re-authorization.
    pub fn authorize_url(&self) -> Result<String, GcalError> {
        let scope = SCOPES.join(" ");
        let query = serde_urlencoded::to_string([
            ("client_id", self.client_id.as_deref().unwrap_or_default()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ])
        .map_err(|e| GcalError::Url(e.to_string()))?;

        Ok(format!("{}?{}", self.auth_url, query))
    }

    pub(crate) fn credentials(&self) -> Result<(&str, &str), GcalError> {
        let id = self
            .client_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| GcalError::Config("GOOGLE_CLIENT_ID is not set".to_string()))?;
        let secret = self
            .client_secret
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| GcalError::Config("GOOGLE_CLIENT_SECRET is not set".to_string()))?;
        Ok((id, secret))
    }
}

/// Derives the fixed callback URI from the public base URL.
///
/// A missing scheme defaults to `https://` and one trailing slash is dropped.
/// Any value starting with `http` counts as having a scheme, so `httpfoo.com`
/// is used as is.
pub fn redirect_uri(base_url: &str) -> String {
    let with_scheme = if base_url.starts_with("http") {
        base_url.to_string()
    } else {
        format!("https://{}", base_url)
    };
    let clean = with_scheme.strip_suffix('/').unwrap_or(&with_scheme);
    format!("{}{}", clean, CALLBACK_PATH)
}
