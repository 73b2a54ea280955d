use error_common::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OmniaError {
    /// Step 1: the validation call failed or answered with an unusable body
    #[error("Omnia SSO - error on step 1: {0}")]
    ValidationUnavailable(String),

    /// Step 2: the resolution call failed or answered with an unusable body
    #[error("Omnia SSO - error on step 2: {0}")]
    ResolutionUnavailable(String),

    /// Step 3: the resolution answer has no username for the identity
    #[error("Omnia SSO - error on step 3: identity {key} could not be resolved")]
    IdentityUnresolved { key: String },

    #[error("Omnia SSO - HTTP client could not be created: {0}")]
    ClientBuild(String),
}

impl Classify for OmniaError {
    fn kind(&self) -> ErrorKind {
        match self {
            OmniaError::ValidationUnavailable(_) => ErrorKind::ValidationUnavailable,
            OmniaError::ResolutionUnavailable(_) => ErrorKind::ResolutionUnavailable,
            OmniaError::IdentityUnresolved { .. } => ErrorKind::IdentityUnresolved,
            OmniaError::ClientBuild(_) => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, OmniaError>;
