use std::sync::Arc;
use cinescout_core::{Config, MovieStore, SanitizedConfig, SearchCoordinator};

/// Shared application state
pub struct AppState {
    config: Config,
    coordinator: Arc<SearchCoordinator>,
    store: Arc<dyn MovieStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        coordinator: Arc<SearchCoordinator>,
        store: Arc<dyn MovieStore>,
    ) -> Self {
        Self {
            config,
            coordinator,
            store,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn coordinator(&self) -> &SearchCoordinator {
        &self.coordinator
    }

    pub fn store(&self) -> &dyn MovieStore {
        self.store.as_ref()
    }
}
