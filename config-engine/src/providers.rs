// Configuration sources, applied in the order they are added
use config::{builder::DefaultState, ConfigBuilder, Environment, File, FileFormat};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Environment prefix: `OMNIA_SSO_CLIENT_ID`, `OMNIA_SSO_OMNIA_URL`, ...
pub const DEFAULT_ENV_PREFIX: &str = "OMNIA_SSO";

#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// TOML, YAML or JSON file, format picked from the extension
    File { path: PathBuf, required: bool },
    /// Inline TOML document
    Toml(String),
    /// Environment variables under a prefix
    Env { prefix: String },
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File {
            path: path.into(),
            required: true,
        }
    }

    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File {
            path: path.into(),
            required: false,
        }
    }

    pub fn toml(document: impl Into<String>) -> Self {
        ConfigSource::Toml(document.into())
    }

    pub fn env() -> Self {
        Self::env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn env_with_prefix(prefix: impl Into<String>) -> Self {
        ConfigSource::Env {
            prefix: prefix.into(),
        }
    }

    pub(crate) fn apply(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>> {
        match self {
            ConfigSource::File { path, required } => {
                if *required && !path.exists() {
                    return Err(ConfigError::SourceNotFound(path.display().to_string()));
                }
                Ok(builder.add_source(File::from(path.as_path()).required(*required)))
            }
            ConfigSource::Toml(document) => {
                Ok(builder.add_source(File::from_str(document, FileFormat::Toml)))
            }
            ConfigSource::Env { prefix } => Ok(builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )),
        }
    }
}
