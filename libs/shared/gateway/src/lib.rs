pub mod client;
pub mod token;

pub use client::ClinicGateway;
pub use token::{Credential, TokenCache};
