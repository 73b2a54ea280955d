use serde::{Deserialize, Serialize};

/// A local account. Owned by the host's user directory; this crate only
/// ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub superuser_access: bool,
}

impl LocalUser {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            email: None,
            superuser_access: false,
        }
    }

    pub fn superuser(mut self) -> Self {
        self.superuser_access = true;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Distinguishes a normal sign-in from an elevated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthCode {
    Success,
    SuccessSuperuser,
}

/// Terminal artifact of a successful sign-on, handed to the host's session
/// initializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub code: AuthCode,
    pub login: String,
    pub session_token: String,
}

impl AuthResult {
    pub fn is_superuser(&self) -> bool {
        self.code == AuthCode::SuccessSuperuser
    }
}
