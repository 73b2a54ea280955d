use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{error::*, models::*, repository::*};

/// Random bytes behind a freshly generated session token (hex-encoded: 32 chars)
const SESSION_TOKEN_BYTES: usize = 16;

/// Turns a sanitized username into an [`AuthResult`].
pub struct SessionIssuer {
    directory: Arc<dyn UserDirectory>,
}

impl SessionIssuer {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Look up `login` and issue a result for it.
    ///
    /// `existing_token` is reused when the request already carries an
    /// established session; otherwise a new random token is generated.
    pub async fn issue(&self, login: &str, existing_token: Option<&str>) -> Result<AuthResult> {
        let user = self
            .directory
            .find_by_login(login)
            .await?
            .filter(|user| !user.login.is_empty())
            .ok_or_else(|| {
                warn!("Resolved username has no local account");
                IdentityError::UserNotFound {
                    login: login.to_string(),
                }
            })?;

        let session_token = match existing_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!("Reusing established session token");
                token.to_string()
            }
            None => generate_session_token(),
        };

        let code = if user.superuser_access {
            AuthCode::SuccessSuperuser
        } else {
            AuthCode::Success
        };

        Ok(AuthResult {
            code,
            login: user.login,
            session_token,
        })
    }
}

/// 128 random bits, hex encoded.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
