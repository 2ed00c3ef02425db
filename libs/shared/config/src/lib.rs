use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ClinicConfig {
    pub clinic_api_url: String,
    pub clinic_client_id: String,
    pub clinic_client_secret: String,
    pub clinic_facility_id: String,
    pub webhook_secret: String,
    pub admin_email: String,
}

impl ClinicConfig {
    pub fn from_env() -> Self {
        let config = Self {
            clinic_api_url: env::var("CLINIC_API_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_URL not set, using empty value");
                    String::new()
                }),
            clinic_client_id: env::var("CLINIC_CLIENT_ID")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_CLIENT_ID not set, using empty value");
                    String::new()
                }),
            clinic_client_secret: env::var("CLINIC_CLIENT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_CLIENT_SECRET not set, using empty value");
                    String::new()
                }),
            clinic_facility_id: env::var("CLINIC_FACILITY_ID")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_FACILITY_ID not set, using empty value");
                    String::new()
                }),
            webhook_secret: env::var("N8N_WEBHOOK_SECRET")
                .unwrap_or_else(|_| {
                    warn!("N8N_WEBHOOK_SECRET not set, using empty value");
                    String::new()
                }),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| {
                    warn!("ADMIN_EMAIL not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.clinic_api_url.is_empty()
            && !self.clinic_client_id.is_empty()
            && !self.clinic_client_secret.is_empty()
            && !self.clinic_facility_id.is_empty()
    }

    pub fn is_webhook_configured(&self) -> bool {
        !self.webhook_secret.is_empty()
    }
}
