//! Local identity side of the Omnia SSO bridge
//!
//! Once an external username has been resolved and sanitized, this crate
//! finds the matching local account and produces the [`AuthResult`] the
//! host's session machinery consumes:
//! - [`UserDirectory`]: read-only lookup of local accounts by login
//! - [`SessionIssuer`]: account lookup, session token reuse or generation,
//!   normal vs. superuser result code
//!
//! Session storage itself is the host's concern.
//!
//! # Example
//!
//! ```rust
//! use auth_identity::{AuthCode, InMemoryUserDirectory, LocalUser, SessionIssuer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = InMemoryUserDirectory::with_users([LocalUser::new("jdoe_xEXTx_")]);
//!     let issuer = SessionIssuer::new(Arc::new(directory));
//!
//!     let result = issuer.issue("jdoe_xEXTx_", None).await?;
//!     assert_eq!(result.code, AuthCode::Success);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
