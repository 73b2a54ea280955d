// Identity provider seam
use async_trait::async_trait;

use crate::cookie::QuotedToken;
use crate::error::Result;
use crate::models::{ExternalIdentity, ValidationOutcome};

/// The two remote calls of the sign-on handshake plus the sign-in redirect.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Step 1: is the browser's token valid, and for whom?
    async fn validate_token(&self, token: &QuotedToken) -> Result<ValidationOutcome>;

    /// Step 2: raw (unsanitized) username of a validated identity.
    async fn resolve_username(&self, identity: &ExternalIdentity) -> Result<String>;

    /// Where to send a browser that must authenticate first.
    fn sign_in_url(&self, return_to: &str) -> String;

    fn name(&self) -> &str;
}
