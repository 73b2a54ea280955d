use config::Config;
use tracing::{debug, info};

use crate::error::Result;
use crate::providers::ConfigSource;
use crate::settings::{RawSettings, SsoSettings};
use crate::validation::validate;

/// Builds [`SsoSettings`] from an ordered list of sources; later sources win.
#[derive(Debug, Default)]
pub struct ConfigEngine {
    sources: Vec<ConfigSource>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Load, merge and validate.
    pub fn build(&self) -> Result<SsoSettings> {
        let mut builder = Config::builder();
        for source in &self.sources {
            debug!(?source, "Adding configuration source");
            builder = source.apply(builder)?;
        }

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        let settings = SsoSettings::from(raw);
        validate(&settings)?;

        info!(
            omnia_url = settings.effective_omnia_url(),
            client_id = %settings.credentials.client_id,
            tls_policy = ?settings.tls_policy,
            timeout_secs = settings.request_timeout_secs,
            "Single sign-on settings loaded"
        );
        Ok(settings)
    }
}
