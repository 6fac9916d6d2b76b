use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
};
use newtab_common::{session, LinkItem, NewtabError};
use newtab_config::AppConfig;
use std::sync::Arc;
use tracing::{debug, error};

use crate::repository::LinkRepository;

#[derive(Clone)]
pub struct LinksState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<dyn LinkRepository>,
}

fn session_key(state: &LinksState, headers: &HeaderMap) -> Result<String, NewtabError> {
    session::refresh_token(headers, &state.config)
        .map(|token| session::session_key(&token))
        .ok_or(NewtabError::Unauthenticated)
}

/// Returns the stored link list for the session.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/links",
    responses(
        (status = 200, description = "Stored links, empty when none were saved", body = [LinkItem]),
        (status = 401, description = "No session cookie"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Links"
))]
pub async fn get_links_handler(
    State(state): State<Arc<LinksState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<LinkItem>>, NewtabError> {
    let key = session_key(&state, &headers)?;
    let links = state.repository.load(&key).await.map_err(|e| {
        error!("Failed to load links: {}", e);
        NewtabError::from(e)
    })?;
    Ok(Json(links.unwrap_or_default()))
}

/// Replaces the stored link list for the session. Last write wins.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/links",
    request_body = [LinkItem],
    responses(
        (status = 204, description = "Links stored"),
        (status = 401, description = "No session cookie"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Links"
))]
pub async fn save_links_handler(
    State(state): State<Arc<LinksState>>,
    headers: HeaderMap,
    Json(links): Json<Vec<LinkItem>>,
) -> Result<StatusCode, NewtabError> {
    let key = session_key(&state, &headers)?;
    debug!("storing {} links", links.len());
    state.repository.save(&key, links).await.map_err(|e| {
        error!("Failed to save links: {}", e);
        NewtabError::from(e)
    })?;
    Ok(StatusCode::NO_CONTENT)
}
