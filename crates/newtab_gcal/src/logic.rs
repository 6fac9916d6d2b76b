// --- File: crates/newtab_gcal/src/logic.rs ---
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use newtab_common::{error::upstream, NewtabError};
use newtab_config::AppConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

#[derive(Error, Debug)]
pub enum GcalError {
    #[error("HTTP request to Google failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Google token endpoint returned {status}: {body}")]
    TokenEndpoint { status: u16, body: String },
    #[error("Google Calendar API returned {status}: {body}")]
    CalendarApi { status: u16, body: String },
    #[error("Missing configuration: {0}")]
    Config(String),
    #[error("Invalid URL: {0}")]
    Url(String),
    #[error("Time calculation error: {0}")]
    Time(String),
}

impl From<GcalError> for NewtabError {
    fn from(err: GcalError) -> Self {
        match err {
            GcalError::Config(msg) => NewtabError::ConfigError(msg),
            GcalError::Time(msg) => NewtabError::InternalError(msg),
            other => upstream("google", other),
        }
    }
}

// --- Data Structures ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CallbackQuery {
    /// Authorization code issued by the provider
    pub code: Option<String>,
    /// Set by the provider when the user declined consent
    pub error: Option<String>,
}

/// Token endpoint response. Only the fields this service reads are kept.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Which credentials are configured, reported on callback failures.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EnvCheck {
    pub has_client_id: bool,
    pub has_client_secret: bool,
    pub has_base_url: bool,
}

impl EnvCheck {
    pub fn from_config(config: &AppConfig) -> Self {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        Self {
            has_client_id: present(&config.google.client_id),
            has_client_secret: present(&config.google.client_secret),
            has_base_url: present(&config.google.base_url),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuthFailureResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_check: Option<EnvCheck>,
}

// --- Day Window ---

/// Start and end of "today" at a fixed UTC offset.
///
/// The calendar date is the offset's date of `now`; the window runs from
/// `00:00:00.000` to `23:59:59.999` at that offset, wherever the server runs.
pub fn day_bounds(
    now: DateTime<Utc>,
    offset_minutes: i32,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), GcalError> {
    let offset = FixedOffset::east_opt(offset_minutes * 60)
        .ok_or_else(|| GcalError::Time(format!("invalid UTC offset: {} minutes", offset_minutes)))?;
    let date = now.with_timezone(&offset).date_naive();

    let start = date
        .and_hms_milli_opt(0, 0, 0, 0)
        .and_then(|naive| offset.from_local_datetime(&naive).single());
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| offset.from_local_datetime(&naive).single());

    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(GcalError::Time(format!("cannot build day window for {}", date))),
    }
}

/// RFC 3339 in UTC with millisecond precision, the form the provider expects.
pub fn format_rfc3339_utc(t: DateTime<FixedOffset>) -> String {
    t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
}
