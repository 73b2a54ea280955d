use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// Name of the cookie the identity provider sets in the browser.
pub const DEFAULT_COOKIE_NAME: &str = "OmniaTokenKey";

/// How outbound TLS connections to the identity provider are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsPolicy {
    /// Normal certificate and host verification
    #[default]
    Verify,
    /// Accept any certificate. Only for deployments whose identity provider
    /// sits behind a self-signed or mismatched certificate.
    AcceptInvalidCerts,
}

/// Credentials attached as `ClientId` / `ClientSecret` headers to every
/// outbound call.
#[derive(Debug)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
        }
    }

    pub fn secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

/// Process-wide single-sign-on settings. Read-only once loaded.
#[derive(Debug)]
pub struct SsoSettings {
    pub credentials: ClientCredentials,

    /// Base URL of the Omnia tenant
    pub omnia_url: String,

    /// Preferred over `omnia_url` when set and non-empty
    pub omnia_override_url: Option<String>,

    /// Bound on each outbound call (default: 30 seconds)
    pub request_timeout_secs: u64,

    pub tls_policy: TlsPolicy,

    pub cookie_name: String,

    /// Lifetime of a confirmation-form nonce (default: 10 minutes)
    pub nonce_ttl_secs: u64,
}

/// Flat shape of the settings as it appears in files and the environment.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSettings {
    #[serde(default)]
    client_id: String,
    #[serde(default = "empty_secret")]
    client_secret: SecretString,
    #[serde(default)]
    omnia_url: String,
    #[serde(default)]
    omnia_override_url: Option<String>,
    #[serde(default = "default_request_timeout")]
    request_timeout_secs: u64,
    #[serde(default)]
    tls_policy: TlsPolicy,
    #[serde(default = "default_cookie_name")]
    cookie_name: String,
    #[serde(default = "default_nonce_ttl")]
    nonce_ttl_secs: u64,
}

impl From<RawSettings> for SsoSettings {
    fn from(raw: RawSettings) -> Self {
        Self {
            credentials: ClientCredentials {
                client_id: raw.client_id,
                client_secret: raw.client_secret,
            },
            omnia_url: raw.omnia_url,
            omnia_override_url: raw.omnia_override_url,
            request_timeout_secs: raw.request_timeout_secs,
            tls_policy: raw.tls_policy,
            cookie_name: raw.cookie_name,
            nonce_ttl_secs: raw.nonce_ttl_secs,
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_nonce_ttl() -> u64 {
    600 // 10 minutes
}

impl SsoSettings {
    /// Settings with defaults for everything but the required fields.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        omnia_url: impl Into<String>,
    ) -> Self {
        Self {
            credentials: ClientCredentials::new(client_id, client_secret),
            omnia_url: omnia_url.into(),
            omnia_override_url: None,
            request_timeout_secs: default_request_timeout(),
            tls_policy: TlsPolicy::default(),
            cookie_name: default_cookie_name(),
            nonce_ttl_secs: default_nonce_ttl(),
        }
    }

    pub fn with_override_url(mut self, url: impl Into<String>) -> Self {
        self.omnia_override_url = Some(url.into());
        self
    }

    pub fn with_tls_policy(mut self, policy: TlsPolicy) -> Self {
        self.tls_policy = policy;
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Base URL used for both outbound calls and sign-in redirects, without
    /// a trailing slash.
    pub fn effective_omnia_url(&self) -> &str {
        let url = match self.omnia_override_url.as_deref().map(str::trim) {
            Some(over) if !over.is_empty() => over,
            _ => self.omnia_url.trim(),
        };
        url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn nonce_ttl(&self) -> Duration {
        Duration::from_secs(self.nonce_ttl_secs)
    }
}
