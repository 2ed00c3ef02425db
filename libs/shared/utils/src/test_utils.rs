use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::ClinicConfig;

/// Canned configuration for tests; point `clinic_api_url` at a wiremock
/// server with `with_base_url`.
pub struct TestConfig {
    pub clinic_api_url: String,
    pub clinic_client_id: String,
    pub clinic_client_secret: String,
    pub clinic_facility_id: String,
    pub webhook_secret: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            clinic_api_url: "http://localhost:9100".to_string(),
            clinic_client_id: "test-client-id".to_string(),
            clinic_client_secret: "test-client-secret".to_string(),
            clinic_facility_id: "77".to_string(),
            webhook_secret: "test-webhook-secret".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            clinic_api_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_clinic_config(&self) -> ClinicConfig {
        ClinicConfig {
            clinic_api_url: self.clinic_api_url.clone(),
            clinic_client_id: self.clinic_client_id.clone(),
            clinic_client_secret: self.clinic_client_secret.clone(),
            clinic_facility_id: self.clinic_facility_id.clone(),
            webhook_secret: self.webhook_secret.clone(),
            admin_email: "admin@example.com".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<ClinicConfig> {
        Arc::new(self.to_clinic_config())
    }
}

/// Canned upstream bodies shared by gateway and facade tests.
pub struct MockClinicResponses;

impl MockClinicResponses {
    pub fn token(expires_in: u64) -> Value {
        json!({
            "access_token": "test-access-token",
            "expires_in": expires_in,
            "token_type": "Bearer"
        })
    }

    pub fn patient_items(items: Value) -> Value {
        json!({ "result": { "items": items } })
    }

    pub fn free_slots(slots: &[&str]) -> Value {
        json!({ "result": { "items": slots } })
    }
}
