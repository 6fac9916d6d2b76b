use newtab_common::NewtabError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinksError {
    #[error("Link storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored link list is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl From<LinksError> for NewtabError {
    fn from(err: LinksError) -> Self {
        NewtabError::StorageError(err.to_string())
    }
}
