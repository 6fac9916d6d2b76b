// File: crates/newtab_gcal/src/handlers.rs
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use newtab_common::{error_response, missing_input, session};
use newtab_config::AppConfig;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::GoogleAuthClient;
use crate::logic::{day_bounds, AuthFailureResponse, CallbackQuery, EnvCheck};
use crate::service::GoogleService;

// Shared state needed by the auth and events handlers
#[derive(Clone)]
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub service: Arc<dyn GoogleService>,
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Redirects the browser to the provider's consent screen.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/auth/login",
    responses(
        (status = 302, description = "Redirect to the Google consent screen"),
        (status = 500, description = "Authorization URL could not be built")
    ),
    tag = "Auth"
))]
pub async fn login_handler(State(state): State<Arc<GcalState>>) -> Response {
    let client = GoogleAuthClient::from_config(&state.config.google);
    match client.authorize_url() {
        Ok(url) => found(&url),
        Err(e) => {
            error!("Failed to build authorization URL: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to start login")
        }
    }
}

/// Exchanges the authorization code and stores the refresh token cookie.
///
/// Redirects home even if the provider sent no refresh token; re-consent
/// flows sometimes omit it and the existing cookie stays valid.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackQuery),
    responses(
        (status = 302, description = "Session cookie set, redirect to /"),
        (status = 400, description = "No code provided"),
        (status = 500, description = "Token exchange failed", body = AuthFailureResponse)
    ),
    tag = "Auth"
))]
pub async fn callback_handler(
    State(state): State<Arc<GcalState>>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        if let Some(provider_error) = query.error {
            warn!("Provider returned an error instead of a code: {}", provider_error);
        }
        return missing_input("No code provided").into_response();
    };

    match state.service.exchange_code(&code).await {
        Ok(tokens) => {
            let mut response = found("/");
            match tokens.refresh_token.filter(|t| !t.is_empty()) {
                Some(refresh_token) => {
                    let cookie = session::session_cookie(&state.config, &refresh_token);
                    match HeaderValue::from_str(&cookie.to_string()) {
                        Ok(value) => {
                            response.headers_mut().insert(header::SET_COOKIE, value);
                            info!("Stored refresh token cookie");
                        }
                        Err(e) => error!("Refresh token is not a valid header value: {}", e),
                    }
                }
                None => info!("Token exchange returned no refresh token; keeping existing session"),
            }
            response
        }
        Err(e) => {
            error!("Auth error: {}", e);
            let body = AuthFailureResponse {
                error: "Authentication failed".to_string(),
                details: Some(e.to_string()),
                env_check: Some(EnvCheck::from_config(&state.config)),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Lists today's events for the session's calendar.
///
/// "Today" uses the configured fixed UTC offset, not the caller's zone.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Provider event list, passed through unchanged"),
        (status = 401, description = "No session cookie"),
        (status = 500, description = "Token refresh or event query failed")
    ),
    tag = "Calendar"
))]
pub async fn events_handler(State(state): State<Arc<GcalState>>, headers: HeaderMap) -> Response {
    let Some(refresh_token) = session::refresh_token(&headers, &state.config) else {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    let result = async {
        let access_token = state.service.refresh_access_token(&refresh_token).await?;
        let (start, end) = day_bounds(Utc::now(), state.config.google.events_utc_offset_minutes)?;
        state.service.list_events(&access_token, start, end).await
    }
    .await;

    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            error!("Events fetch error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch events")
        }
    }
}
