// Error reporting utilities
// Terminal flow errors are shown to the user as an HTML message

use crate::sanitization::escape_html;
use crate::types::{Classify, ErrorKind};

/// A rendered, user-visible error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlErrorPage {
    pub kind: ErrorKind,
    pub status: u16,
    pub body: String,
}

impl HtmlErrorPage {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        let body = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Sign-in error</title></head>\n\
             <body>\n<div class=\"sso-error\" data-code=\"{code}\">\n<h1>Sign-in failed</h1>\n\
             <p>{message}</p>\n<p class=\"sso-error-code\">Error code: {code}</p>\n</div>\n</body>\n</html>\n",
            code = kind.code(),
            message = escape_html(message),
        );
        Self {
            kind,
            status: kind.status_code(),
            body,
        }
    }

    /// Render an error and log it with its code.
    pub fn report<E: Classify>(error: &E) -> Self {
        let kind = error.kind();
        tracing::error!(
            error_code = kind.code(),
            error_type = %kind,
            error = %error,
            "Single sign-on flow failed"
        );
        Self::new(kind, &error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("settings invalid: {0}")]
    struct SettingsInvalid(String);

    impl Classify for SettingsInvalid {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Configuration
        }
    }

    #[test]
    fn test_page_escapes_message() {
        let page = HtmlErrorPage::new(ErrorKind::LocalUserNotFound, "user <b>x</b> not found");
        assert_eq!(page.status, 403);
        assert!(page.body.contains("user &lt;b&gt;x&lt;/b&gt; not found"));
        assert!(page.body.contains("SSO_2001"));
        assert!(!page.body.contains("<b>x</b>"));
    }

    #[test]
    fn test_report_uses_error_kind() {
        let page = HtmlErrorPage::report(&SettingsInvalid("omnia_url missing".into()));
        assert_eq!(page.kind, ErrorKind::Configuration);
        assert_eq!(page.status, 500);
        assert!(page.body.contains("omnia_url missing"));
    }
}
