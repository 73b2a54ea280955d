//! Omnia identity provider client for the SSO bridge
//!
//! This crate covers everything that talks to, or decodes data from, Omnia:
//! - Decoding the `OmniaTokenKey` browser cookie into a token
//! - Validating the token remotely (`/api/auth/validation`)
//! - Resolving the validated identity to a username (`/api/identity/resolveidentities`)
//! - Normalising that username to the local naming convention
//! - Building the `/spsignin` redirect for browsers that must sign in first
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_omnia::{extract_token, sanitize_username, CookieToken, IdentityProvider, OmniaClient, ValidationOutcome};
//! use config_engine::SsoSettings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = SsoSettings::new("client-id", "client-secret", "https://omnia.example.com");
//!     let client = OmniaClient::new(Arc::new(settings))?;
//!
//!     if let CookieToken::Present(token) = extract_token(Some("eyJ0b2tlbktleSI6InRvazEifQ==")) {
//!         if let ValidationOutcome::Authenticated(identity) = client.validate_token(&token).await? {
//!             let username = client.resolve_username(&identity).await?;
//!             println!("local login: {}", sanitize_username(&username));
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod cookie;
pub mod error;
pub mod models;
pub mod provider;
pub mod sanitizer;

pub use client::*;
pub use cookie::*;
pub use error::*;
pub use models::*;
pub use provider::*;
pub use sanitizer::*;
