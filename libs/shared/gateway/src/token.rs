use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use shared_models::error::ClinicError;

/// Margin subtracted from the upstream expiry so a token is never used right
/// at the edge of its validity window.
const SAFETY_MARGIN: Duration = Duration::from_secs(30);

/// One bearer token and its computed expiry.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    expires_at: Instant,
}

impl Credential {
    /// Builds a credential from the token endpoint's `expires_in` seconds.
    pub fn new(token: String, expires_in_secs: u64) -> Self {
        Self {
            token,
            expires_at: Instant::now() + Duration::from_secs(expires_in_secs),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Instant::now())
    }

    /// Usable while `now < expires_at - SAFETY_MARGIN`.
    pub fn is_usable_at(&self, now: Instant) -> bool {
        now + SAFETY_MARGIN < self.expires_at
    }
}

/// Single-slot credential cache shared by every outbound clinic API call.
///
/// The slot is guarded by an async mutex held across the refresh exchange,
/// so concurrent callers that both observe a stale credential coalesce on
/// one in-flight refresh instead of issuing parallel ones. A failed refresh
/// leaves the slot unset and the next caller retries cleanly.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<Credential>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token while it is still usable, otherwise runs
    /// `refresh` and stores its result before returning the new token.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, ClinicError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Credential, ClinicError>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(credential) = slot.as_ref() {
            if credential.is_usable() {
                return Ok(credential.token().to_owned());
            }
        }

        let credential = refresh().await?;
        let token = credential.token().to_owned();
        *slot = Some(credential);

        Ok(token)
    }

    pub async fn has_credential(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}
