use newtab_common::NewtabError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    /// The remote side rejected the credentials (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Remote returned {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Local storage error: {0}")]
    Storage(String),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Time calculation error: {0}")]
    Time(String),
}

impl WidgetError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, WidgetError::Unauthorized)
    }
}

impl From<std::io::Error> for WidgetError {
    fn from(err: std::io::Error) -> Self {
        WidgetError::Storage(err.to_string())
    }
}

impl From<WidgetError> for NewtabError {
    fn from(err: WidgetError) -> Self {
        match err {
            WidgetError::Unauthorized => NewtabError::Unauthenticated,
            WidgetError::Time(msg) => NewtabError::InternalError(msg),
            other => NewtabError::SyncFailure(other.to_string()),
        }
    }
}
