//! Configuration management for the Omnia SSO bridge
//!
//! Settings are process-wide and read-only once loaded. They are assembled
//! from an ordered list of sources, later sources overriding earlier ones:
//!
//! - **Local files**: TOML, YAML or JSON, picked by extension
//! - **Inline documents**: TOML strings (handy in tests)
//! - **Environment variables**: `OMNIA_SSO_CLIENT_ID`, `OMNIA_SSO_OMNIA_URL`, ...
//!
//! The merged result is validated before it is handed out.
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigEngine, ConfigSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ConfigEngine::new()
//!         .add_source(ConfigSource::optional_file("omnia-sso.toml"))
//!         .add_source(ConfigSource::env())
//!         .build()?;
//!
//!     println!("Signing in against {}", settings.effective_omnia_url());
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod providers;
pub mod settings;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use providers::*;
pub use settings::*;
