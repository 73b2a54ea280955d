use serde::{Deserialize, Serialize};

use crate::codes;

/// Terminal failure kinds of the single-sign-on flow.
///
/// Redirects to the identity provider are not represented here: they are
/// normal control flow, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Validation endpoint unreachable or returned an unusable body
    ValidationUnavailable,
    /// Resolution endpoint unreachable or returned an unusable body
    ResolutionUnavailable,
    /// Resolution answered but did not contain the validated identity
    IdentityUnresolved,
    /// Resolved username has no local account
    LocalUserNotFound,
    /// Missing, unknown or already-consumed form nonce
    CsrfRejected,
    /// Invalid or incomplete settings
    Configuration,
    /// Anything else
    Internal,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::ValidationUnavailable => codes::identity_provider::VALIDATION_UNAVAILABLE,
            ErrorKind::ResolutionUnavailable => codes::identity_provider::RESOLUTION_UNAVAILABLE,
            ErrorKind::IdentityUnresolved => codes::identity_provider::IDENTITY_UNRESOLVED,
            ErrorKind::LocalUserNotFound => codes::local::LOCAL_USER_NOT_FOUND,
            ErrorKind::CsrfRejected => codes::local::CSRF_REJECTED,
            ErrorKind::Configuration => codes::system::CONFIGURATION,
            ErrorKind::Internal => codes::system::INTERNAL,
        }
    }

    /// HTTP status the error page is served with.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::ValidationUnavailable
            | ErrorKind::ResolutionUnavailable
            | ErrorKind::IdentityUnresolved => 502,
            ErrorKind::LocalUserNotFound | ErrorKind::CsrfRejected => 403,
            ErrorKind::Configuration | ErrorKind::Internal => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ValidationUnavailable => "validation_unavailable",
            ErrorKind::ResolutionUnavailable => "resolution_unavailable",
            ErrorKind::IdentityUnresolved => "identity_unresolved",
            ErrorKind::LocalUserNotFound => "local_user_not_found",
            ErrorKind::CsrfRejected => "csrf_rejected",
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every crate-level error so the HTTP edge can map it.
pub trait Classify: std::error::Error {
    fn kind(&self) -> ErrorKind;
}
