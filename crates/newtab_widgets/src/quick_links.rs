//! Quick links: local-first list with best-effort remote sync.

use async_trait::async_trait;
use newtab_common::LinkItem;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::WidgetError;
use crate::keyboard::{handle_key, KeyAction, KeyEvent};
use crate::storage::StateStore;

#[cfg(test)]
use mockall::automock;

/// Where the re-authentication affordance points.
pub const LOGIN_URL: &str = "/api/auth/login";
pub const DELETE_PROMPT: &str = "Remove this link?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Never synced successfully
    #[default]
    Local,
    /// Last remote operation succeeded
    Synced,
    /// Last remote operation failed or was unauthorized
    Error,
}

/// Whole-list access to the links store endpoint.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteLinks: Send + Sync {
    async fn fetch(&self) -> Result<Vec<LinkItem>, WidgetError>;

    async fn push(&self, links: &[LinkItem]) -> Result<(), WidgetError>;
}

/// Interactive yes/no prompt.
#[cfg_attr(test, automock)]
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

pub fn default_links() -> Vec<LinkItem> {
    [
        ("1", "Google", "https://google.com"),
        ("2", "YouTube", "https://youtube.com"),
        ("3", "X", "https://x.com"),
        ("4", "GitHub", "https://github.com"),
        ("5", "Gmail", "https://mail.google.com"),
        ("6", "ChatGPT", "https://chat.openai.com"),
    ]
    .into_iter()
    .map(|(id, title, url)| LinkItem::new(id, title, url))
    .collect()
}

/// Prefixes `https://` unless the URL already starts with `http`.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Remote wins when it has anything; otherwise the local list stays.
pub fn reconcile(local: Vec<LinkItem>, remote: Vec<LinkItem>) -> Vec<LinkItem> {
    if remote.is_empty() {
        local
    } else {
        remote
    }
}

/// Descending by clicks. Equal counts keep their order.
pub fn sort_by_clicks(links: &mut [LinkItem]) {
    links.sort_by(|a, b| b.clicks.cmp(&a.clicks));
}

/// Millisecond timestamp id, bumped past any id already in use.
pub fn next_link_id(now_millis: i64, existing: &[LinkItem]) -> String {
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|link| link.id == id) {
            return id;
        }
        candidate += 1;
    }
}

pub struct QuickLinksWidget<S, R, C> {
    store: S,
    remote: R,
    confirm: C,
    links: Vec<LinkItem>,
    status: SyncStatus,
    needs_auth: bool,
    selected: Option<usize>,
}

impl<S, R, C> QuickLinksWidget<S, R, C>
where
    S: StateStore<Vec<LinkItem>>,
    R: RemoteLinks,
    C: Confirm,
{
    pub fn new(store: S, remote: R, confirm: C) -> Self {
        Self {
            store,
            remote,
            confirm,
            links: Vec::new(),
            status: SyncStatus::Local,
            needs_auth: false,
            selected: None,
        }
    }

    pub fn links(&self) -> &[LinkItem] {
        &self.links
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// The last remote call was rejected; show a link to [`LOGIN_URL`].
    pub fn needs_auth(&self) -> bool {
        self.needs_auth
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Local list (or the defaults), then one reconcile against the remote copy.
    pub async fn load(&mut self) {
        self.links = match self.store.load() {
            Ok(Some(links)) => links,
            Ok(None) => default_links(),
            Err(e) => {
                warn!("Stored quick links unreadable, using defaults: {}", e);
                default_links()
            }
        };

        match self.remote.fetch().await {
            Ok(remote) => {
                if !remote.is_empty() {
                    self.links = reconcile(std::mem::take(&mut self.links), remote);
                    self.save_local();
                }
                self.mark_synced();
            }
            Err(e) => self.mark_failed("fetch", &e),
        }
    }

    /// Counts a click and re-sorts. Returns `false` for unknown ids.
    pub async fn record_click(&mut self, id: &str) -> bool {
        let Some(link) = self.links.iter_mut().find(|link| link.id == id) else {
            return false;
        };
        link.clicks += 1;
        sort_by_clicks(&mut self.links);
        self.persist().await;
        true
    }

    pub async fn add(&mut self, title: &str, url: &str) -> Option<LinkItem> {
        let now = chrono::Utc::now().timestamp_millis();
        self.add_at(title, url, now).await
    }

    /// [`add`](Self::add) with an explicit creation time, in epoch milliseconds.
    pub async fn add_at(&mut self, title: &str, url: &str, now_millis: i64) -> Option<LinkItem> {
        if title.is_empty() || url.is_empty() {
            return None;
        }
        let item = LinkItem::new(
            next_link_id(now_millis, &self.links),
            title,
            normalize_url(url),
        );
        self.links.push(item.clone());
        self.persist().await;
        Some(item)
    }

    /// Removes a link once the user confirms. Returns whether anything was removed.
    pub async fn delete(&mut self, id: &str) -> bool {
        if !self.confirm.confirm(DELETE_PROMPT) {
            return false;
        }
        let before = self.links.len();
        self.links.retain(|link| link.id != id);
        if self.links.len() == before {
            return false;
        }
        if self.selected.is_some_and(|i| i >= self.links.len()) {
            self.selected = self.links.len().checked_sub(1);
        }
        self.persist().await;
        true
    }

    /// Applies a key press. Returns the URL to navigate to, if a link was activated.
    pub async fn on_key(&mut self, event: &KeyEvent) -> Option<String> {
        match handle_key(event, self.selected, self.links.len()) {
            KeyAction::Ignore => None,
            KeyAction::Select(selected) => {
                self.selected = selected;
                None
            }
            KeyAction::Activate(index) => {
                let link = self.links.get(index)?.clone();
                self.record_click(&link.id).await;
                Some(link.url)
            }
        }
    }

    fn save_local(&self) {
        if let Err(e) = self.store.save(&self.links) {
            warn!("Failed to store quick links locally: {}", e);
        }
    }

    async fn persist(&mut self) {
        self.save_local();
        match self.remote.push(&self.links).await {
            Ok(()) => self.mark_synced(),
            Err(e) => self.mark_failed("push", &e),
        }
    }

    fn mark_synced(&mut self) {
        debug!("quick links synced");
        self.status = SyncStatus::Synced;
        self.needs_auth = false;
    }

    fn mark_failed(&mut self, operation: &str, err: &WidgetError) {
        warn!("Quick links {} failed: {}", operation, err);
        self.status = SyncStatus::Error;
        self.needs_auth = err.is_unauthorized();
    }
}
