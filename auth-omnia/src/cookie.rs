//! Identity cookie decoding.
//!
//! Omnia sets a cookie whose value is base64 of a JSON object
//! `{"tokenKey": "..."}`. The token is extracted and wrapped as a JSON string
//! literal, which is exactly the body the validation endpoint expects.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde_json::Value;
use tracing::debug;

use crate::models::{is_empty_value, scalar_to_string};

/// A token rendered as a single JSON string literal, e.g. `"abc123"`.
///
/// An undecodable cookie yields the empty literal `""`; it is still sent to
/// the validation endpoint, which rejects it, so every bad cookie takes the
/// same downstream path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedToken(String);

impl QuotedToken {
    pub fn new(token: &str) -> Self {
        Self(Value::String(token.to_string()).to_string())
    }

    pub fn placeholder() -> Self {
        Self::new("")
    }

    pub fn as_json(&self) -> &str {
        &self.0
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == "\"\""
    }
}

/// What the browser presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieToken {
    /// No identity cookie at all
    Missing,
    /// Cookie present; the token may be the placeholder
    Present(QuotedToken),
}

/// Turn the raw cookie value (if any) into a token for validation.
pub fn extract_token(raw_cookie: Option<&str>) -> CookieToken {
    match raw_cookie {
        None => CookieToken::Missing,
        Some(raw) => {
            let token = decode_token_key(raw).map_or_else(QuotedToken::placeholder, |key| QuotedToken::new(&key));
            if token.is_placeholder() {
                debug!("Identity cookie present but carries no usable token key");
            }
            CookieToken::Present(token)
        }
    }
}

fn decode_token_key(raw: &str) -> Option<String> {
    let unescaped = urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |s| s.into_owned());
    let bytes = decode_base64(unescaped.trim())?;
    let object: Value = serde_json::from_slice(&bytes).ok()?;
    let key = object.get("tokenKey").filter(|v| !is_empty_value(v))?;
    scalar_to_string(key)
}

fn decode_base64(input: &str) -> Option<Vec<u8>> {
    [STANDARD, URL_SAFE, STANDARD_NO_PAD, URL_SAFE_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(input).ok())
}
