use serde_json::Value;

/// A principal inside Omnia, as returned by token validation.
///
/// The raw JSON object is kept so it can be forwarded to the resolution
/// endpoint exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    pub id: String,
    pub kind: String,
    pub raw: Value,
}

impl ExternalIdentity {
    /// Build from the `identity` object of a validation response.
    pub fn from_value(raw: &Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }
        let id = raw.get("id").and_then(scalar_to_string)?;
        let kind = raw.get("type").and_then(scalar_to_string)?;
        Some(Self {
            id,
            kind,
            raw: raw.clone(),
        })
    }

    /// Key of this identity in a resolution response: `<id>[<type>]`.
    ///
    /// Ambiguous when `id` or `type` themselves contain brackets; the
    /// identity provider keys its answer this way, so it is kept as-is.
    pub fn composite_key(&self) -> String {
        format!("{}[{}]", self.id, self.kind)
    }
}

/// Result of the validation step.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// `status == 0`: the token is valid and an identity is attached
    Authenticated(ExternalIdentity),
    /// Any other status: the browser must sign in at Omnia first
    NotAuthenticated { status: i64 },
}

/// Emptiness as the identity provider's clients have always judged it:
/// `null`, `false`, `0`, `""`, `"0"` and `[]` are empty, objects never are.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

/// Strings pass through, numbers are rendered; everything else is `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `data` member of a response body, if present and non-empty.
pub(crate) fn non_empty_data(body: &Value) -> Option<&Value> {
    body.get("data").filter(|data| !is_empty_value(data))
}

pub(crate) fn parse_status(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
