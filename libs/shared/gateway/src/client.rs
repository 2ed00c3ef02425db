use base64::{engine::general_purpose, Engine as _};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::ClinicConfig;
use shared_models::error::ClinicError;

use crate::token::{Credential, TokenCache};

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    expires_in: u64,
}

/// Authenticated HTTP client for the upstream clinic API.
///
/// Owns the token cache, injects the bearer header on every call, and maps
/// response statuses into the `ClinicError` taxonomy. Response bodies are
/// returned as raw JSON; schema validation is the caller's responsibility.
/// No retries: a single failed call surfaces immediately.
pub struct ClinicGateway {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    facility_id: String,
    tokens: TokenCache,
}

impl ClinicGateway {
    pub fn new(config: &ClinicConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.clinic_api_url.clone(),
            client_id: config.clinic_client_id.clone(),
            client_secret: config.clinic_client_secret.clone(),
            facility_id: config.clinic_facility_id.clone(),
            tokens: TokenCache::new(),
        }
    }

    /// Prefixes `suffix` with the facility-scoped integration base path.
    pub fn facility_path(&self, suffix: &str) -> String {
        format!(
            "/api/v1/integration/facilities/{}{}",
            self.facility_id, suffix
        )
    }

    /// OAuth2 client-credentials exchange against `POST /oauth/v1/token`.
    async fn exchange_credentials(&self) -> Result<Credential, ClinicError> {
        let url = format!("{}/oauth/v1/token", self.base_url);
        let basic = general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret));

        debug!("Requesting new clinic API access token");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Basic {}", basic))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ClinicError::Authentication(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Token exchange failed ({}): {}", status, body);
            return Err(ClinicError::Authentication(format!(
                "token endpoint returned status {}",
                status
            )));
        }

        let payload: TokenExchangeResponse = response
            .json()
            .await
            .map_err(|e| ClinicError::Authentication(format!("invalid token response: {}", e)))?;

        Ok(Credential::new(payload.access_token, payload.expires_in))
    }

    async fn access_token(&self) -> Result<String, ClinicError> {
        self.tokens
            .get_or_refresh(|| self.exchange_credentials())
            .await
    }

    /// Executes one authenticated upstream call.
    ///
    /// `Ok(None)` is the synthetic marker for 204 No Content; other 2xx
    /// bodies come back as unvalidated JSON. Non-2xx bodies are read as text
    /// for the log and discarded.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ClinicError> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.base_url, path);

        debug!("Clinic API request: {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClinicError::Transport(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Clinic API error ({}): {}", status, body);
            return Err(ClinicError::Upstream {
                status: status.as_u16(),
            });
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ClinicError::Transport(format!("invalid JSON body: {}", e)))?;

        Ok(Some(value))
    }

    /// GET expecting a JSON body.
    pub async fn get(&self, path: &str) -> Result<Value, ClinicError> {
        self.send(Method::GET, path, None)
            .await?
            .ok_or_else(|| ClinicError::Schema("expected a body, got 204".to_string()))
    }

    /// POST expecting a JSON body back.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ClinicError> {
        self.send(Method::POST, path, Some(body))
            .await?
            .ok_or_else(|| ClinicError::Schema("expected a body, got 204".to_string()))
    }

    /// DELETE where 204 is the expected outcome; any 2xx counts as done.
    pub async fn delete(&self, path: &str) -> Result<(), ClinicError> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}
