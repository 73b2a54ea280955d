use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static redaction pattern must compile")
}

lazy_static! {
    static ref EMAIL_REGEX: Regex = compile(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b");
    static ref CLIENT_SECRET_REGEX: Regex = compile(r#"(?i)(client_?secret"?\s*[:=]\s*"?)[^"\s,}]+"#);
    static ref TOKEN_KEY_REGEX: Regex = compile(r#"(?i)("?token_?key"?\s*[:=]\s*"?)[^"\s,}]+"#);
    static ref BEARER_REGEX: Regex = compile(r"(?i)(bearer\s+)[A-Za-z0-9\-._~+/]+=*");
}

const REDACTED: &str = "[REDACTED]";

/// Redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_secrets: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_secrets: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    pub fn with_custom_pattern(mut self, pattern: Regex, replacement: impl Into<String>) -> Self {
        self.custom_patterns.push((pattern, replacement.into()));
        self
    }
}

/// Masks credentials and identity data before they reach a log line.
///
/// Client secrets, cookie token keys and bearer tokens are always replaced
/// with `[REDACTED]`. E-mail shaped identifiers (the usual form of an
/// external username) are either hashed, so that two log lines about the
/// same user can still be correlated, or partially masked.
#[derive(Debug, Clone, Default)]
pub struct SecretRedactor {
    config: RedactionConfig,
}

impl SecretRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_secrets {
            result = CLIENT_SECRET_REGEX
                .replace_all(&result, format!("${{1}}{REDACTED}").as_str())
                .into_owned();
            result = TOKEN_KEY_REGEX
                .replace_all(&result, format!("${{1}}{REDACTED}").as_str())
                .into_owned();
            result = BEARER_REGEX
                .replace_all(&result, format!("${{1}}{REDACTED}").as_str())
                .into_owned();
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).into_owned();
        }

        result
    }

    /// Redact a value that is known to be an identifier (a login name).
    ///
    /// Unlike [`redact`](Self::redact) this never lets the value through
    /// unchanged, even when it does not look like an e-mail address.
    pub fn redact_identifier(&self, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        if self.config.hash_for_correlation {
            format!("ID[{}]", self.hash_value(value))
        } else {
            let first: String = value.chars().take(1).collect();
            format!("{first}***")
        }
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                let email = caps.get(0).map_or("", |m| m.as_str());
                if self.config.hash_for_correlation {
                    format!("EMAIL[{}]", self.hash_value(email))
                } else {
                    match email.split_once('@') {
                        Some((local, domain)) => {
                            let l: String = local.chars().take(1).collect();
                            let d: String = domain.chars().take(1).collect();
                            format!("{l}***@{d}***")
                        }
                        None => "***@***".to_string(),
                    }
                }
            })
            .into_owned()
    }

    fn hash_value(&self, value: &str) -> String {
        let digest = Sha256::digest(value.as_bytes());
        // First 8 bytes are enough for correlation
        general_purpose::STANDARD_NO_PAD.encode(digest.get(..8).unwrap_or_default())
    }
}
