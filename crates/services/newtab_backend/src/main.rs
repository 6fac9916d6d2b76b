// File: services/newtab_backend/src/main.rs
use newtab_backend::{build_app, service_factory::NewtabServiceFactory};
use newtab_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    // dropping the guard stops the file writer
    let _log_guard = newtab_common::init_from_config(&config.logging);
    info!("Starting newtab backend (run_env={})", config.run_env);

    let factory = NewtabServiceFactory::new(config.clone());
    let app = build_app(&factory);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
