use newtab_common::LinkItem;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_links_handler,
        crate::handlers::save_links_handler
    ),
    components(schemas(LinkItem)),
    tags(
        (name = "Links", description = "Per-session quick links")
    ),
    servers(
        (url = "/api", description = "newtab API server")
    )
)]
pub struct LinksApiDoc;
