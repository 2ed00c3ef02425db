use thiserror::Error;

/// Failure taxonomy for calls against the upstream clinic API.
///
/// Every variant is caught at the operation facade and normalized into an
/// `ApiResponse` failure; the variant itself is only ever logged server-side.
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Missing required input: {0}")]
    Validation(String),

    #[error("Token exchange failed: {0}")]
    Authentication(String),

    #[error("Upstream clinic API returned status {status}")]
    Upstream { status: u16 },

    #[error("Unexpected upstream response shape: {0}")]
    Schema(String),

    #[error("Request failed: {0}")]
    Transport(String),
}

impl ClinicError {
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ClinicError::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}
