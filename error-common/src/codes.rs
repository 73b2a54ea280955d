// Error codes implementation
// Stable codes surfaced on the HTML error page and in logs

pub mod identity_provider {
    pub const VALIDATION_UNAVAILABLE: &str = "SSO_1001";
    pub const RESOLUTION_UNAVAILABLE: &str = "SSO_1002";
    pub const IDENTITY_UNRESOLVED: &str = "SSO_1003";
}

pub mod local {
    pub const LOCAL_USER_NOT_FOUND: &str = "SSO_2001";
    pub const CSRF_REJECTED: &str = "SSO_2002";
}

pub mod system {
    pub const CONFIGURATION: &str = "SSO_9001";
    pub const INTERNAL: &str = "SSO_9002";
}
