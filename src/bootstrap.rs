//! Wiring of adapters from configuration.

use std::sync::Arc;

use crate::adapters::cycle_api::{HttpCycleLister, HttpCycleListerConfig};
use crate::adapters::identity::WatchIdentityProvider;
use crate::adapters::storage::{FileSelectionStorage, InMemorySelectionStorage};
use crate::application::cycle::{CycleStore, CycleSyncController};
use crate::config::{AppConfig, ConfigError, StorageBackend};
use crate::ports::{CycleListError, SelectionStorage};

/// Errors raised while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build cycle lister: {0}")]
    CycleLister(#[from] CycleListError),
}

/// Everything needed to mount a `CycleScope` and serve HTTP.
pub struct Components {
    pub controller: CycleSyncController,
    pub identity: Arc<WatchIdentityProvider>,
}

/// Builds the selection storage configured in `config`.
pub fn selection_storage(config: &AppConfig) -> Arc<dyn SelectionStorage> {
    match config.storage.backend {
        StorageBackend::File => Arc::new(FileSelectionStorage::new(&config.storage.selection_path)),
        StorageBackend::Memory => Arc::new(InMemorySelectionStorage::new()),
    }
}

/// Builds the HTTP cycle lister configured in `config`.
pub fn cycle_lister(config: &AppConfig) -> Result<HttpCycleLister, CycleListError> {
    let mut lister_config =
        HttpCycleListerConfig::new(&config.cycle_api.base_url).with_timeout(config.cycle_api.timeout());
    if let Some(token) = config.cycle_api.api_token.as_ref().filter(|t| !t.is_empty()) {
        lister_config = lister_config.with_api_token(token.clone());
    }
    HttpCycleLister::new(lister_config)
}

/// Validates `config` and assembles the cycle selection components.
pub fn build(config: &AppConfig) -> Result<Components, BootstrapError> {
    config.validate().map_err(ConfigError::from)?;

    let user = config.identity.user().map_err(ConfigError::from)?;
    let identity = Arc::new(WatchIdentityProvider::new(user));
    let store = CycleStore::with_key(selection_storage(config), &config.storage.selection_key);
    let controller = CycleSyncController::new(
        Arc::new(cycle_lister(config)?),
        identity.clone(),
        store,
    );

    Ok(Components {
        controller,
        identity,
    })
}
