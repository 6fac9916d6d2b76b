// File: crates/newtab_gcal/src/doc.rs

use utoipa::OpenApi;

use crate::logic::{AuthFailureResponse, EnvCheck};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::login_handler,
        crate::handlers::callback_handler,
        crate::handlers::events_handler
    ),
    components(schemas(AuthFailureResponse, EnvCheck)),
    tags(
        (name = "Auth", description = "Google sign-in and session cookie"),
        (name = "Calendar", description = "Today's events")
    ),
    servers(
        (url = "/api", description = "newtab API server")
    )
)]
pub struct GcalApiDoc;
