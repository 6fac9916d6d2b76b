// --- File: crates/newtab_gcal/src/routes.rs ---

use crate::handlers::{callback_handler, events_handler, login_handler, GcalState};
use crate::service::{GoogleApiService, GoogleService};
use axum::{routing::get, Router};
use newtab_config::AppConfig;
use std::sync::Arc;

/// Builds the auth and events routes backed by the real Google endpoints.
///
/// The router is meant to be nested under `/api`.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let service = GoogleApiService::from_config(&config);
    routes_with_service(config, Arc::new(service))
}

/// Same routes over any [`GoogleService`]; tests pass a mock here.
pub fn routes_with_service(config: Arc<AppConfig>, service: Arc<dyn GoogleService>) -> Router {
    let state = Arc::new(GcalState { config, service });

    Router::new()
        .route("/auth/login", get(login_handler))
        .route("/auth/callback", get(callback_handler))
        .route("/events", get(events_handler))
        .with_state(state)
}
