use anyhow::{Context, Result};
use auth_gateway::{InMemoryNonceStore, OmniaSsoGateway};
use auth_identity::{InMemoryUserDirectory, LocalUser, UserDirectory};
use auth_omnia::OmniaClient;
use config_engine::SsoSettings;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::session::SessionStore;

/// Shared state of the SSO server
#[derive(Clone)]
pub struct SsoServer {
    pub settings: Arc<SsoSettings>,
    pub gateway: Arc<OmniaSsoGateway>,
    pub sessions: Arc<SessionStore>,
}

impl SsoServer {
    pub fn new(settings: SsoSettings, directory: Arc<dyn UserDirectory>) -> Result<Self> {
        let settings = Arc::new(settings);
        let client = OmniaClient::new(settings.clone()).context("Failed to create Omnia client")?;
        let nonces = InMemoryNonceStore::new(settings.nonce_ttl());

        Ok(Self {
            gateway: Arc::new(OmniaSsoGateway::new(
                Arc::new(client),
                directory,
                Arc::new(nonces),
            )),
            sessions: Arc::new(SessionStore::new()),
            settings,
        })
    }

    pub fn cookie_name(&self) -> &str {
        &self.settings.cookie_name
    }
}

/// Load local accounts from a JSON array of `{login, superuser_access, email}`.
pub fn load_user_directory(path: &Path) -> Result<InMemoryUserDirectory> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read user directory {}", path.display()))?;
    let users: Vec<LocalUser> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid user directory {}", path.display()))?;

    let directory = InMemoryUserDirectory::with_users(users);
    info!(users = directory.len(), path = %path.display(), "Loaded local user directory");
    Ok(directory)
}
