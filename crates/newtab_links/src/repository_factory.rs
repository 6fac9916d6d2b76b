//! Picks the link storage backend from configuration.

use newtab_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::repository::{FileLinkRepository, InMemoryLinkRepository, LinkRepository};

/// File storage when `links.storage_dir` is set, memory otherwise.
pub fn create_repository(config: &AppConfig) -> Arc<dyn LinkRepository> {
    match config.links.storage_dir.as_deref().filter(|d| !d.is_empty()) {
        Some(dir) => {
            info!("Quick links are stored as files under {}", dir);
            Arc::new(FileLinkRepository::new(dir))
        }
        None => {
            info!("Quick links are kept in memory");
            Arc::new(InMemoryLinkRepository::new())
        }
    }
}
