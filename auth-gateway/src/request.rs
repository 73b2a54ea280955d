use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// The parts of an inbound request the sign-on flow looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsoRequest {
    /// Raw value of the identity provider's cookie
    pub token_cookie: Option<String>,
    /// Explicit `redirectUrl` request parameter
    pub redirect_url: Option<String>,
    /// `Host` header
    pub host: String,
    /// Path and query of the request
    pub request_uri: String,
    /// Session token already established for this browser, if any
    pub session_token: Option<String>,
}

impl SsoRequest {
    pub fn new(host: impl Into<String>, request_uri: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            request_uri: request_uri.into(),
            ..Self::default()
        }
    }

    pub fn with_token_cookie(mut self, value: impl Into<String>) -> Self {
        self.token_cookie = Some(value.into());
        self
    }

    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Where the browser goes once the flow is over: the explicit parameter
    /// when it stays on this host, else the current URL rebuilt as
    /// `https://<host><uri>`.
    pub fn return_url(&self) -> String {
        self.redirect_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .and_then(|url| self.same_host_target(url))
            .unwrap_or_else(|| format!("https://{}{}", self.host, self.request_uri))
    }

    /// `candidate` as an absolute URL if it is a local path or points at
    /// the request's own host.
    fn same_host_target(&self, candidate: &str) -> Option<String> {
        if candidate.chars().any(|c| c.is_ascii_control() || c.is_whitespace()) {
            debug!("Ignoring redirect target with control characters");
            return None;
        }

        if candidate.starts_with('/') {
            if candidate.starts_with("//") || candidate.starts_with("/\\") {
                debug!("Ignoring protocol-relative redirect target");
                return None;
            }
            return Some(format!("https://{}{}", self.host, candidate));
        }

        let url = Url::parse(candidate).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let authority = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return None,
        };
        if !authority.eq_ignore_ascii_case(&self.host) {
            debug!(target_host = %authority, "Ignoring redirect target on a foreign host");
            return None;
        }
        Some(url.to_string())
    }
}
