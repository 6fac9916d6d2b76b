use axum::{routing::get, Router};
use newtab_config::AppConfig;
use std::sync::Arc;

use crate::handlers::{get_links_handler, save_links_handler, LinksState};
use crate::repository::LinkRepository;
use crate::repository_factory::create_repository;

/// Creates the links router with the backend chosen by configuration.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let repository = create_repository(&config);
    routes_with_repository(config, repository)
}

pub fn routes_with_repository(config: Arc<AppConfig>, repository: Arc<dyn LinkRepository>) -> Router {
    let state = Arc::new(LinksState { config, repository });

    Router::new()
        .route("/links", get(get_links_handler).post(save_links_handler))
        .with_state(state)
}
