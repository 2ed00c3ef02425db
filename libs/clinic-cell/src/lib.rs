pub mod facade;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use shared_config::ClinicConfig;

use crate::services::ClinicService;

/// Shared application state: the config plus the one clinic service whose
/// token cache survives across requests.
pub struct AppState {
    pub config: ClinicConfig,
    pub clinic: ClinicService,
}

impl AppState {
    pub fn new(config: ClinicConfig, clinic: ClinicService) -> Self {
        Self { config, clinic }
    }
}
