//! Storage backends for per-session link lists.

use newtab_common::{BoxFuture, LinkItem};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::LinksError;

/// Whole-list storage keyed by session key. Writes replace the previous list.
pub trait LinkRepository: Send + Sync {
    /// `None` when nothing was stored for the key.
    fn load<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<Vec<LinkItem>>, LinksError>;

    fn save<'a>(&'a self, key: &'a str, links: Vec<LinkItem>) -> BoxFuture<'a, (), LinksError>;
}

/// Process-lifetime storage. The default backend.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    lists: RwLock<HashMap<String, Vec<LinkItem>>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkRepository for InMemoryLinkRepository {
    fn load<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<Vec<LinkItem>>, LinksError> {
        Box::pin(async move { Ok(self.lists.read().await.get(key).cloned()) })
    }

    fn save<'a>(&'a self, key: &'a str, links: Vec<LinkItem>) -> BoxFuture<'a, (), LinksError> {
        Box::pin(async move {
            self.lists.write().await.insert(key.to_string(), links);
            Ok(())
        })
    }
}

/// One `<key>.json` file per session below a directory.
///
/// Files are written to a uniquely named temporary sibling first and renamed
/// into place, so a reader never sees a half-written list. Writes are
/// serialised; overlapping saves for one session end with the last one.
#[derive(Debug, Clone)]
pub struct FileLinkRepository {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileLinkRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LinksError> {
        // keys are hex digests; anything else could escape the directory
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LinksError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl LinkRepository for FileLinkRepository {
    fn load<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<Vec<LinkItem>>, LinksError> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e.into()),
            };
            Ok(Some(serde_json::from_slice(&bytes)?))
        })
    }

    fn save<'a>(&'a self, key: &'a str, links: Vec<LinkItem>) -> BoxFuture<'a, (), LinksError> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            let tmp = self.dir.join(format!("{}.{}.tmp", key, Uuid::new_v4().simple()));
            let bytes = serde_json::to_vec(&links)?;

            let _guard = self.write_lock.lock().await;
            tokio::fs::create_dir_all(&self.dir).await?;
            tokio::fs::write(&tmp, &bytes).await?;
            if let Err(e) = tokio::fs::rename(&tmp, &path).await {
                if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                    warn!("could not remove {}: {}", tmp.display(), cleanup);
                }
                return Err(e.into());
            }
            debug!("saved {} links to {}", links.len(), path.display());
            Ok(())
        })
    }
}
