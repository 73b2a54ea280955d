use error_common::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Omnia SSO - local user '{login}' not found")]
    UserNotFound { login: String },

    #[error("User directory error: {0}")]
    DirectoryError(#[from] anyhow::Error),
}

impl Classify for IdentityError {
    fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::UserNotFound { .. } => ErrorKind::LocalUserNotFound,
            IdentityError::DirectoryError(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
