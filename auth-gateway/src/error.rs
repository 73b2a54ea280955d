use auth_identity::IdentityError;
use auth_omnia::OmniaError;
use error_common::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Provider(#[from] OmniaError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("Omnia SSO - the confirmation form has expired or was already submitted")]
    CsrfRejected,

    #[error("Omnia SSO - sign in before confirming your password")]
    SessionRequired,
}

impl Classify for GatewayError {
    fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Provider(e) => e.kind(),
            GatewayError::Identity(e) => e.kind(),
            GatewayError::CsrfRejected | GatewayError::SessionRequired => ErrorKind::CsrfRejected,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
