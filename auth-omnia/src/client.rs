/// Omnia identity provider client
///
/// Implements the two-step handshake behind single sign-on:
/// - `POST <omnia>/api/auth/validation` with the cookie token as body
/// - `POST <omnia>/api/identity/resolveidentities` with the validated identity
///
/// Both calls carry the `ClientId` / `ClientSecret` headers. Transport
/// failures, unreadable bodies and malformed JSON all collapse into the
/// step's `*Unavailable` error; the HTTP status code itself is only logged,
/// the body decides.

use async_trait::async_trait;
use config_engine::{SsoSettings, TlsPolicy};
use logger_redacted::SecretRedactor;
use reqwest::{header::CONTENT_TYPE, Client as HttpClient};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cookie::QuotedToken;
use crate::error::{OmniaError, Result};
use crate::models::{
    is_empty_value, non_empty_data, parse_status, scalar_to_string, ExternalIdentity,
    ValidationOutcome,
};
use crate::provider::IdentityProvider;

pub const VALIDATION_PATH: &str = "/api/auth/validation";
pub const RESOLUTION_PATH: &str = "/api/identity/resolveidentities";
pub const SIGN_IN_PATH: &str = "/spsignin";

const CLIENT_ID_HEADER: &str = "ClientId";
const CLIENT_SECRET_HEADER: &str = "ClientSecret";

/// Longest body excerpt written to the log on a parse failure
const MAX_LOGGED_BODY: usize = 256;

pub struct OmniaClient {
    settings: Arc<SsoSettings>,
    base_url: String,
    http_client: HttpClient,
    redactor: SecretRedactor,
}

impl OmniaClient {
    /// Create a client. One instance is meant to be shared by all requests.
    pub fn new(settings: Arc<SsoSettings>) -> Result<Self> {
        let mut builder = HttpClient::builder().timeout(settings.request_timeout());

        if settings.tls_policy == TlsPolicy::AcceptInvalidCerts {
            warn!("TLS certificate verification towards Omnia is disabled by configuration");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http_client = builder
            .build()
            .map_err(|e| OmniaError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url: settings.effective_omnia_url().to_string(),
            settings,
            http_client,
            redactor: SecretRedactor::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body and parse the answer. `None` means the call produced
    /// nothing usable; the reason has already been logged.
    async fn post_json(&self, path: &str, body: String) -> Option<Value> {
        let url = format!("{}{}", self.base_url, path);
        let credentials = &self.settings.credentials;

        let response = match self
            .http_client
            .post(&url)
            .header(CLIENT_ID_HEADER, credentials.client_id.as_str())
            .header(CLIENT_SECRET_HEADER, credentials.secret())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, timeout = e.is_timeout(), "Omnia request failed");
                return None;
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %url, status = %status, error = %e, "Omnia response body unreadable");
                return None;
            }
        };
        debug!(url = %url, status = %status, bytes = text.len(), "Omnia responded");

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                let excerpt: String = text.chars().take(MAX_LOGGED_BODY).collect();
                warn!(
                    url = %url,
                    status = %status,
                    error = %e,
                    body = %self.redactor.redact(&excerpt),
                    "Omnia response is not valid JSON"
                );
                None
            }
        }
    }
}

/// Interpret a validation response body.
pub fn interpret_validation(body: Option<&Value>) -> Result<ValidationOutcome> {
    let data = body
        .and_then(non_empty_data)
        .ok_or_else(|| OmniaError::ValidationUnavailable("response carries no data".to_string()))?;

    let status = parse_status(data.get("status"))
        .ok_or_else(|| OmniaError::ValidationUnavailable("response carries no status".to_string()))?;

    if status != 0 {
        return Ok(ValidationOutcome::NotAuthenticated { status });
    }

    data.get("identity")
        .and_then(ExternalIdentity::from_value)
        .map(ValidationOutcome::Authenticated)
        .ok_or_else(|| {
            OmniaError::ValidationUnavailable("token accepted but no identity attached".to_string())
        })
}

/// Interpret a resolution response body for one identity.
pub fn interpret_resolution(body: Option<&Value>, identity: &ExternalIdentity) -> Result<String> {
    let data = body
        .and_then(non_empty_data)
        .ok_or_else(|| OmniaError::ResolutionUnavailable("response carries no data".to_string()))?;

    let key = identity.composite_key();
    data.get(&key)
        .filter(|record| !is_empty_value(record))
        .and_then(|record| record.pointer("/username/value/text"))
        .filter(|text| !is_empty_value(text))
        .and_then(scalar_to_string)
        .ok_or(OmniaError::IdentityUnresolved { key })
}

#[async_trait]
impl IdentityProvider for OmniaClient {
    async fn validate_token(&self, token: &QuotedToken) -> Result<ValidationOutcome> {
        let body = self.post_json(VALIDATION_PATH, token.as_json().to_string()).await;
        let outcome = interpret_validation(body.as_ref())?;
        match &outcome {
            ValidationOutcome::Authenticated(identity) => {
                debug!(identity_type = %identity.kind, "Omnia token validated");
            }
            ValidationOutcome::NotAuthenticated { status } => {
                debug!(status, "Omnia reports the browser as not signed in");
            }
        }
        Ok(outcome)
    }

    async fn resolve_username(&self, identity: &ExternalIdentity) -> Result<String> {
        let payload = Value::Array(vec![identity.raw.clone()]).to_string();
        let body = self.post_json(RESOLUTION_PATH, payload).await;
        interpret_resolution(body.as_ref(), identity)
    }

    fn sign_in_url(&self, return_to: &str) -> String {
        format!(
            "{}{}?redirectUrl={}",
            self.base_url,
            SIGN_IN_PATH,
            urlencoding::encode(return_to)
        )
    }

    fn name(&self) -> &str {
        "omnia"
    }
}
