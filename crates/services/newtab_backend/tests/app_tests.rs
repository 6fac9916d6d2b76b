use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use newtab_backend::{build_app, service_factory::NewtabServiceFactory, API_WELCOME};
use newtab_config::AppConfig;
use newtab_gcal::logic::TokenResponse;
use newtab_gcal::service::mock::MockGoogleService;
use newtab_links::InMemoryLinkRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(config: AppConfig, google: MockGoogleService) -> Router {
    let factory = NewtabServiceFactory::with_services(
        Arc::new(config),
        Arc::new(google),
        Arc::new(InMemoryLinkRepository::new()),
    );
    build_app(&factory)
}

fn app() -> Router {
    let google = MockGoogleService::new()
        .with_code(
            "good",
            TokenResponse {
                access_token: "at1".to_string(),
                refresh_token: Some("rt1".to_string()),
                ..TokenResponse::default()
            },
        )
        .with_refresh_token("rt1", "at1")
        .with_events(json!({"items": []}));
    app_with(AppConfig::default(), google)
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_api_root_is_alive() {
    let response = app().oneshot(get("/api", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, API_WELCOME.as_bytes());
}

#[tokio::test]
async fn test_routes_are_nested_under_api() {
    let response = app().oneshot(get("/api/auth/login", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = app().oneshot(get("/auth/login", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_in_then_use_session_everywhere() {
    let app = app();

    let callback = app
        .clone()
        .oneshot(get("/api/auth/callback?code=good", None))
        .await
        .unwrap();
    assert_eq!(callback.status(), StatusCode::FOUND);
    let set_cookie = callback.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    let session = set_cookie.split(';').next().unwrap().to_string();
    assert_eq!(session, "google_refresh_token=rt1");

    let events = app
        .clone()
        .oneshot(get("/api/events", Some(&session)))
        .await
        .unwrap();
    assert_eq!(events.status(), StatusCode::OK);

    let saved = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/links")
                .header(header::COOKIE, &session)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!([{"id": "1", "title": "Docs", "url": "https://docs.rs", "clicks": 0}])
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(saved.status(), StatusCode::NO_CONTENT);

    let links = app.oneshot(get("/api/links", Some(&session))).await.unwrap();
    let body: Value = serde_json::from_slice(&body_bytes(links).await).unwrap();
    assert_eq!(body[0]["title"], "Docs");
}

#[tokio::test]
async fn test_production_cookie_is_secure() {
    let config = AppConfig {
        run_env: "production".to_string(),
        ..AppConfig::default()
    };
    let google = MockGoogleService::new().with_code(
        "good",
        TokenResponse {
            access_token: "at1".to_string(),
            refresh_token: Some("rt1".to_string()),
            ..TokenResponse::default()
        },
    );

    let response = app_with(config, google)
        .oneshot(get("/api/auth/callback?code=good", None))
        .await
        .unwrap();

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Secure"));
}

#[tokio::test]
async fn test_static_shell_is_served_as_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>newtab</html>").unwrap();
    let mut config = AppConfig::default();
    config.server.static_dir = Some(dir.path().to_string_lossy().into_owned());

    let app = app_with(config, MockGoogleService::new());

    let page = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(body_bytes(page).await, b"<html>newtab</html>");

    let api = app.oneshot(get("/api/events", None)).await.unwrap();
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
}
