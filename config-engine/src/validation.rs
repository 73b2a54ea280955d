// Settings validation
use secrecy::ExposeSecret;
use url::Url;

use crate::error::{ConfigError, Result};
use crate::settings::SsoSettings;

pub fn validate(settings: &SsoSettings) -> Result<()> {
    let mut problems = Vec::new();

    if settings.credentials.client_id.trim().is_empty() {
        problems.push("client_id must be set".to_string());
    }
    if settings.credentials.client_secret.expose_secret().trim().is_empty() {
        problems.push("client_secret must be set".to_string());
    }
    if settings.omnia_url.trim().is_empty() {
        problems.push("omnia_url must be set".to_string());
    } else if let Err(reason) = check_url(&settings.omnia_url) {
        problems.push(format!("omnia_url {reason}"));
    }
    if let Some(over) = settings.omnia_override_url.as_deref() {
        if !over.trim().is_empty() {
            if let Err(reason) = check_url(over) {
                problems.push(format!("omnia_override_url {reason}"));
            }
        }
    }
    if settings.request_timeout_secs == 0 {
        problems.push("request_timeout_secs must be greater than zero".to_string());
    }
    if settings.nonce_ttl_secs == 0 {
        problems.push("nonce_ttl_secs must be greater than zero".to_string());
    }
    if settings.cookie_name.trim().is_empty() {
        problems.push("cookie_name must not be empty".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(problems.join("; ")))
    }
}

fn check_url(raw: &str) -> std::result::Result<(), String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("is not a valid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("has unsupported scheme '{other}'")),
    }
    if url.host_str().is_none() {
        return Err("has no host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings() {
        let settings = SsoSettings::new("id", "secret", "https://omnia.example.com");
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let settings = SsoSettings::new("", " ", "");
        let err = validate(&settings).unwrap_err().to_string();
        assert!(err.contains("client_id"));
        assert!(err.contains("client_secret"));
        assert!(err.contains("omnia_url"));
    }

    #[test]
    fn test_bad_override_url() {
        let settings = SsoSettings::new("id", "secret", "https://omnia.example.com")
            .with_override_url("ftp://omnia.example.com");
        let err = validate(&settings).unwrap_err().to_string();
        assert!(err.contains("omnia_override_url has unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings =
            SsoSettings::new("id", "secret", "https://omnia.example.com").with_request_timeout(0);
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn test_zero_nonce_ttl_rejected() {
        let mut settings = SsoSettings::new("id", "secret", "https://omnia.example.com");
        settings.nonce_ttl_secs = 0;
        let err = validate(&settings).unwrap_err().to_string();
        assert!(err.contains("nonce_ttl_secs must be greater than zero"));
    }
}
