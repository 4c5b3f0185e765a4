use std::sync::Arc;

use toolshelf_catalog::{CatalogService, ClickAccumulator, ClickConfig};
use toolshelf_core::{Catalog, ClickTracker, Repository};

use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<dyn Catalog>,
    clicks: Arc<dyn ClickTracker>,
    config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        clicks: Arc<dyn ClickTracker>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            catalog,
            clicks,
            config: Arc::new(config),
        }
    }

    /// Builds the catalog and the click accumulator over one shared
    /// repository.
    pub fn from_repository<R: Repository>(
        repository: R,
        click_config: ClickConfig,
        config: GatewayConfig,
    ) -> Self {
        let repository = Arc::new(repository);
        let catalog = CatalogService::new(repository.clone());
        let clicks = ClickAccumulator::new(repository, click_config);
        Self::new(Arc::new(catalog), Arc::new(clicks), config)
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn clicks(&self) -> &dyn ClickTracker {
        self.clicks.as_ref()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
