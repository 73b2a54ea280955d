//! Logging for the Omnia SSO bridge
//!
//! Two things live here: installing the process-wide `tracing` subscriber, and
//! the [`SecretRedactor`] used wherever a value that came from the identity
//! provider (or from configuration) is about to be logged.
//!
//! # Redacted by default
//!
//! - **Client secrets**: `ClientSecret: abc` → `ClientSecret: [REDACTED]`
//! - **Cookie token keys**: `"tokenKey":"abc"` → `"tokenKey":"[REDACTED]"`
//! - **Bearer tokens**: `Bearer abc` → `Bearer [REDACTED]`
//! - **E-mail addresses**: hashed to `EMAIL[...]` so lines can still be correlated
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_tracing, LoggerConfig, SecretRedactor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing(&LoggerConfig::default().verbose(true))?;
//!
//!     let redactor = SecretRedactor::default();
//!     tracing::info!(login = %redactor.redact_identifier("jdoe_xEXTx_"), "Signed in");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod redactor;
pub mod subscriber;

pub use config::*;
pub use redactor::*;
pub use subscriber::*;
