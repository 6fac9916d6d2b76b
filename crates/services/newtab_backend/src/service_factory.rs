// --- File: crates/services/newtab_backend/src/service_factory.rs ---
//! Builds the provider and storage services the routers run on.

use newtab_config::AppConfig;
use newtab_gcal::service::{GoogleApiService, GoogleService};
use newtab_links::{create_repository, LinkRepository};
use std::sync::Arc;

pub struct NewtabServiceFactory {
    config: Arc<AppConfig>,
    google_service: Arc<dyn GoogleService>,
    link_repository: Arc<dyn LinkRepository>,
}

impl NewtabServiceFactory {
    /// Real Google endpoints and the configured link storage.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let google_service = Arc::new(GoogleApiService::from_config(&config));
        let link_repository = create_repository(&config);

        Self {
            config,
            google_service,
            link_repository,
        }
    }

    /// Explicit services, for tests and alternative wiring.
    pub fn with_services(
        config: Arc<AppConfig>,
        google_service: Arc<dyn GoogleService>,
        link_repository: Arc<dyn LinkRepository>,
    ) -> Self {
        Self {
            config,
            google_service,
            link_repository,
        }
    }

    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }

    pub fn google_service(&self) -> Arc<dyn GoogleService> {
        self.google_service.clone()
    }

    pub fn link_repository(&self) -> Arc<dyn LinkRepository> {
        self.link_repository.clone()
    }
}
