// --- File: crates/newtab_gcal/src/service.rs ---
//! Google identity and calendar provider access.
//!
//! The handlers only see the [`GoogleService`] trait, so tests swap in
//! [`mock::MockGoogleService`] instead of talking to Google.

use chrono::{DateTime, FixedOffset};
use newtab_common::{client_for, BoxFuture, HTTP_CLIENT};
use newtab_config::AppConfig;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::GoogleAuthClient;
use crate::logic::{format_rfc3339_utc, GcalError, TokenResponse};

pub trait GoogleService: Send + Sync {
    /// Exchanges an authorization code for tokens.
    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, TokenResponse, GcalError>;

    /// Mints a fresh access token from a refresh token.
    fn refresh_access_token<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> BoxFuture<'a, String, GcalError>;

    /// Lists single event instances overlapping `[time_min, time_max]`,
    /// ordered by start time. The provider body is returned untouched.
    fn list_events<'a>(
        &'a self,
        access_token: &'a str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> BoxFuture<'a, Value, GcalError>;
}

/// [`GoogleService`] over the public Google endpoints.
pub struct GoogleApiService {
    auth: GoogleAuthClient,
    calendar_id: String,
    http: Client,
}

impl GoogleApiService {
    pub fn new(auth: GoogleAuthClient, calendar_id: impl Into<String>, http: Client) -> Self {
        Self {
            auth,
            calendar_id: calendar_id.into(),
            http,
        }
    }

    /// Wiring used by the server: credentials, calendar and the outbound
    /// client honouring `http.timeout_secs`.
    pub fn from_config(config: &AppConfig) -> Self {
        let auth = GoogleAuthClient::from_config(&config.google);
        info!("Google OAuth redirect URI: {}", auth.redirect_uri);
        if auth.credentials().is_err() {
            warn!("Google client credentials are not configured; sign-in will fail");
        }

        let http = client_for(config.http.timeout_secs).unwrap_or_else(|e| {
            warn!("Falling back to the shared HTTP client: {}", e);
            HTTP_CLIENT.clone()
        });
        Self::new(auth, config.google.calendar_id.clone(), http)
    }

    fn events_url(&self) -> Result<Url, GcalError> {
        let mut url = Url::parse(&self.auth.calendar_api_base)
            .map_err(|e| GcalError::Url(format!("{}: {}", self.auth.calendar_api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| GcalError::Url("calendar API base cannot be a base URL".to_string()))?
            .pop_if_empty()
            .push("calendars")
            .push(&self.calendar_id)
            .push("events");
        Ok(url)
    }

    async fn post_token_form(&self, form: &[(&str, &str)]) -> Result<TokenResponse, GcalError> {
        let response = self.http.post(&self.auth.token_url).form(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GcalError::TokenEndpoint {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<TokenResponse>().await?)
    }
}

impl GoogleService for GoogleApiService {
    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, TokenResponse, GcalError> {
        Box::pin(async move {
            let (client_id, client_secret) = self.auth.credentials()?;
            debug!("exchanging authorization code at {}", self.auth.token_url);
            self.post_token_form(&[
                ("code", code),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("redirect_uri", self.auth.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .await
        })
    }

    fn refresh_access_token<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> BoxFuture<'a, String, GcalError> {
        Box::pin(async move {
            let (client_id, client_secret) = self.auth.credentials()?;
            let tokens = self
                .post_token_form(&[
                    ("refresh_token", refresh_token),
                    ("client_id", client_id),
                    ("client_secret", client_secret),
                    ("grant_type", "refresh_token"),
                ])
                .await?;
            Ok(tokens.access_token)
        })
    }

    fn list_events<'a>(
        &'a self,
        access_token: &'a str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> BoxFuture<'a, Value, GcalError> {
        Box::pin(async move {
            let url = self.events_url()?;
            let time_min = format_rfc3339_utc(time_min);
            let time_max = format_rfc3339_utc(time_max);
            debug!("listing events {} .. {}", time_min, time_max);

            let response = self
                .http
                .get(url)
                .bearer_auth(access_token)
                .query(&[
                    ("timeMin", time_min.as_str()),
                    ("timeMax", time_max.as_str()),
                    ("singleEvents", "true"),
                    ("orderBy", "startTime"),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GcalError::CalendarApi {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(response.json::<Value>().await?)
        })
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory provider: known codes, known refresh tokens, one event list.
    #[derive(Default)]
    pub struct MockGoogleService {
        codes: Mutex<HashMap<String, TokenResponse>>,
        refresh_tokens: Mutex<HashMap<String, String>>,
        events: Mutex<Value>,
        last_window: Mutex<Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>>,
    }

    impl MockGoogleService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_code(self, code: &str, tokens: TokenResponse) -> Self {
            lock(&self.codes).insert(code.to_string(), tokens);
            self
        }

        pub fn with_refresh_token(self, refresh_token: &str, access_token: &str) -> Self {
            lock(&self.refresh_tokens).insert(refresh_token.to_string(), access_token.to_string());
            self
        }

        pub fn with_events(self, events: Value) -> Self {
            *lock(&self.events) = events;
            self
        }

        /// Window passed to the most recent `list_events` call.
        pub fn last_window(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
            *lock(&self.last_window)
        }
    }

    fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn invalid_grant() -> GcalError {
        GcalError::TokenEndpoint {
            status: 400,
            body: r#"{"error":"invalid_grant"}"#.to_string(),
        }
    }

    impl GoogleService for MockGoogleService {
        fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, TokenResponse, GcalError> {
            Box::pin(async move { lock(&self.codes).get(code).cloned().ok_or_else(invalid_grant) })
        }

        fn refresh_access_token<'a>(
            &'a self,
            refresh_token: &'a str,
        ) -> BoxFuture<'a, String, GcalError> {
            Box::pin(async move {
                lock(&self.refresh_tokens)
                    .get(refresh_token)
                    .cloned()
                    .ok_or_else(invalid_grant)
            })
        }

        fn list_events<'a>(
            &'a self,
            access_token: &'a str,
            time_min: DateTime<FixedOffset>,
            time_max: DateTime<FixedOffset>,
        ) -> BoxFuture<'a, Value, GcalError> {
            Box::pin(async move {
                *lock(&self.last_window) = Some((time_min, time_max));
                let known = lock(&self.refresh_tokens)
                    .values()
                    .any(|token| token == access_token);
                if !known {
                    return Err(GcalError::CalendarApi {
                        status: 401,
                        body: "invalid credentials".to_string(),
                    });
                }
                Ok(lock(&self.events).clone())
            })
        }
    }
}
