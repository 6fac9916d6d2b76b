// --- File: crates/newtab_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the pre-built page shell, served as fallback for non-API paths.
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

// --- Google OAuth / Calendar Config ---
// client_secret may be set to "secret_from_env" in files; the value is then
// taken from NEWTAB_SECRET_GOOGLE_CLIENT_SECRET or GOOGLE_CLIENT_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    /// Public base URL of this site, used to derive the OAuth redirect URI.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_calendar_api_base")]
    pub calendar_api_base: String,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// Offset used by `/api/events` to decide what "today" is. Defaults to UTC+9.
    #[serde(default = "default_events_utc_offset_minutes")]
    pub events_utc_offset_minutes: i32,
}

fn default_auth_url() -> String {
    GOOGLE_AUTH_URL.to_string()
}

fn default_token_url() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

fn default_calendar_api_base() -> String {
    GOOGLE_CALENDAR_API_BASE.to_string()
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_events_utc_offset_minutes() -> i32 {
    9 * 60
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: None,
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            calendar_api_base: default_calendar_api_base(),
            calendar_id: default_calendar_id(),
            events_utc_offset_minutes: default_events_utc_offset_minutes(),
        }
    }
}

// --- Session Cookie Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: i64,
    /// Forces the Secure flag on or off. When unset it follows `run_env == "production"`.
    #[serde(default)]
    pub secure: Option<bool>,
}

fn default_cookie_name() -> String {
    "google_refresh_token".to_string()
}

fn default_max_age_secs() -> i64 {
    60 * 60 * 24 * 365
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            max_age_secs: default_max_age_secs(),
            secure: None,
        }
    }
}

// --- Quick Links Store Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LinksConfig {
    /// When set, link lists are written as JSON files below this directory.
    /// Otherwise they live in memory for the lifetime of the process.
    #[serde(default)]
    pub storage_dir: Option<String>,
}

// --- Outbound HTTP Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HttpConfig {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Daily rolling log files are written here in addition to stdout.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_run_env")]
    pub run_env: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_run_env() -> String {
    "debug".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            run_env: default_run_env(),
            server: ServerConfig::default(),
            google: GoogleConfig::default(),
            session: SessionConfig::default(),
            links: LinksConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.run_env.eq_ignore_ascii_case("production")
    }

    /// Whether the session cookie carries the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.session.secure.unwrap_or_else(|| self.is_production())
    }
}
