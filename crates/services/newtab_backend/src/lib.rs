// --- File: crates/services/newtab_backend/src/lib.rs ---
pub mod service_factory;

use axum::{http::Request, routing::get, Router};
use newtab_gcal::routes::routes_with_service as gcal_routes;
use newtab_links::routes_with_repository as links_routes;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};

use crate::service_factory::NewtabServiceFactory;

pub const API_WELCOME: &str = "Welcome to the newtab API!";

/// Assembles the full application: `/api` routes, optional docs and the static page shell.
pub fn build_app(factory: &NewtabServiceFactory) -> Router {
    let config = factory.config();

    let api_router = Router::new()
        .route("/", get(|| async { API_WELCOME }))
        .merge(gcal_routes(config.clone(), factory.google_service()))
        .merge(links_routes(config.clone(), factory.link_repository()));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use newtab_gcal::doc::GcalApiDoc;
        use newtab_links::doc::LinksApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "newtab API",
                version = "0.1.0",
                description = "Sign-in, calendar and quick links for the newtab page"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(GcalApiDoc::openapi());
        openapi_doc.merge(LinksApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let app = match config.server.static_dir.as_deref() {
        Some(dir) if Path::new(dir).is_dir() => {
            info!("Serving static files from {}", dir);
            app.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            warn!("Static directory {} does not exist; serving the API only", dir);
            app
        }
        None => app,
    };

    app.layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            info_span!(
                "request",
                request_id = %uuid::Uuid::new_v4(),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }),
    )
}
