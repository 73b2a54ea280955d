use auth_identity::{AuthResult, SessionIssuer, UserDirectory};
use auth_omnia::{extract_token, sanitize_username, CookieToken, IdentityProvider, ValidationOutcome};
use logger_redacted::SecretRedactor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::csrf::{NonceStore, CONFIRMATION_NONCE};
use crate::error::{GatewayError, Result};
use crate::request::SsoRequest;

/// Caption of the button on the password-confirmation form
pub const CONFIRMATION_CAPTION: &str = "Authorize with Omnia";

/// Terminal, non-error results of the auto-login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoLoginOutcome {
    /// The browser must authenticate at the identity provider first
    Redirect(String),
    /// A local session was issued; send the browser back to `redirect_to`
    SignedIn { auth: AuthResult, redirect_to: String },
}

/// Result of the validate-only sub-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateOutcome {
    /// The browser holds a live identity provider session for `login`
    Verified { login: String },
    NotAuthenticated,
}

impl ValidateOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, ValidateOutcome::Verified { .. })
    }
}

/// Data the host's password-confirmation form embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationForm {
    pub caption: String,
    pub nonce: String,
}

/// Drives the sign-on flow for one request at a time; shared by all requests.
pub struct OmniaSsoGateway {
    provider: Arc<dyn IdentityProvider>,
    issuer: SessionIssuer,
    nonces: Arc<dyn NonceStore>,
    redactor: SecretRedactor,
}

impl OmniaSsoGateway {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        directory: Arc<dyn UserDirectory>,
        nonces: Arc<dyn NonceStore>,
    ) -> Self {
        Self {
            provider,
            issuer: SessionIssuer::new(directory),
            nonces,
            redactor: SecretRedactor::default(),
        }
    }

    /// Sign the browser in from its identity provider cookie, or tell the
    /// caller where to send it to authenticate.
    #[instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn auto_login(&self, request: &SsoRequest) -> Result<AutoLoginOutcome> {
        let return_url = request.return_url();

        let Some(login) = self.username_from_cookie(request).await? else {
            let target = self.provider.sign_in_url(&return_url);
            debug!("Redirecting to the identity provider sign-in page");
            return Ok(AutoLoginOutcome::Redirect(target));
        };

        let auth = self
            .issuer
            .issue(&login, request.session_token.as_deref())
            .await?;

        info!(
            login = %self.redactor.redact_identifier(&auth.login),
            superuser = auth.is_superuser(),
            "Single sign-on succeeded"
        );

        Ok(AutoLoginOutcome::SignedIn {
            auth,
            redirect_to: return_url,
        })
    }

    /// Confirm the browser's identity without issuing a session. The form
    /// nonce must belong to the request's session; it is checked and spent
    /// before anything else happens.
    #[instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn validate_auth(
        &self,
        request: &SsoRequest,
        form_nonce: Option<&str>,
    ) -> Result<ValidateOutcome> {
        let session = request
            .session_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(GatewayError::CsrfRejected)?;
        let accepted = form_nonce
            .filter(|nonce| !nonce.is_empty())
            .is_some_and(|nonce| self.nonces.consume(CONFIRMATION_NONCE, session, nonce));
        if !accepted {
            return Err(GatewayError::CsrfRejected);
        }

        match self.username_from_cookie(request).await? {
            Some(login) => {
                info!(
                    login = %self.redactor.redact_identifier(&login),
                    "Password confirmation satisfied by identity provider session"
                );
                Ok(ValidateOutcome::Verified { login })
            }
            None => Ok(ValidateOutcome::NotAuthenticated),
        }
    }

    /// Form data for an established session; replaces any nonce the
    /// session was given before.
    pub fn confirmation_form(&self, session: Option<&str>) -> Result<ConfirmationForm> {
        let session = session
            .filter(|token| !token.is_empty())
            .ok_or(GatewayError::SessionRequired)?;
        Ok(ConfirmationForm {
            caption: CONFIRMATION_CAPTION.to_string(),
            nonce: self.nonces.issue(CONFIRMATION_NONCE, session),
        })
    }

    /// Sessions served by single sign-on never re-enter a local password.
    pub fn requires_password_confirmation(&self, _login: &str) -> bool {
        false
    }

    /// Cookie, validation, resolution and sanitization. `None` means the
    /// browser is not signed in at the identity provider.
    async fn username_from_cookie(&self, request: &SsoRequest) -> Result<Option<String>> {
        let token = match extract_token(request.token_cookie.as_deref()) {
            CookieToken::Missing => {
                debug!(stage = "cookie", "No identity cookie");
                return Ok(None);
            }
            CookieToken::Present(token) => token,
        };

        let identity = match self.provider.validate_token(&token).await? {
            ValidationOutcome::Authenticated(identity) => identity,
            ValidationOutcome::NotAuthenticated { status } => {
                debug!(stage = "validation", status, "Token not accepted");
                return Ok(None);
            }
        };

        let resolved = self.provider.resolve_username(&identity).await?;
        let login = sanitize_username(&resolved);
        if login.is_empty() {
            return Ok(None);
        }
        Ok(Some(login))
    }
}
