//! Single sign-on orchestration for the Omnia SSO bridge
//!
//! [`OmniaSsoGateway`] sequences the identity provider client
//! (`auth-omnia`) and the local session issuer (`auth-identity`) into the
//! two flows the HTTP surface exposes:
//!
//! - **auto-login**: cookie, validation, resolution, sanitization, local
//!   lookup, session. A browser without a live identity provider session is
//!   redirected to the provider's sign-in page instead.
//! - **validate-only**: the same identity check without issuing a session,
//!   guarded by a one-time form nonce ([`NonceStore`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_gateway::{AutoLoginOutcome, InMemoryNonceStore, OmniaSsoGateway, SsoRequest};
//! use auth_identity::{InMemoryUserDirectory, LocalUser};
//! use auth_omnia::OmniaClient;
//! use config_engine::SsoSettings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Arc::new(SsoSettings::new("client-id", "client-secret", "https://omnia.example.com"));
//!     let gateway = OmniaSsoGateway::new(
//!         Arc::new(OmniaClient::new(settings.clone())?),
//!         Arc::new(InMemoryUserDirectory::with_users([LocalUser::new("jdoe_xEXTx_")])),
//!         Arc::new(InMemoryNonceStore::new(settings.nonce_ttl())),
//!     );
//!
//!     let request = SsoRequest::new("analytics.example.com", "/index.php")
//!         .with_token_cookie("eyJ0b2tlbktleSI6InRvazEifQ==");
//!     match gateway.auto_login(&request).await? {
//!         AutoLoginOutcome::Redirect(url) => println!("sign in first: {url}"),
//!         AutoLoginOutcome::SignedIn { auth, redirect_to } => {
//!             println!("{} signed in, back to {redirect_to}", auth.login)
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod csrf;
pub mod error;
pub mod gateway;
pub mod request;

pub use csrf::*;
pub use error::*;
pub use gateway::*;
pub use request::*;
