//! Username normalisation.
//!
//! Guest accounts federated into Omnia carry `#EXT#` in their user principal
//! name, and domain-qualified names carry a backslash. Neither is allowed in
//! local logins, so local accounts for such users are created with the
//! replacements below already applied.

/// Ordered `(from, to)` pairs.
pub const REPLACEMENTS: [(&str, &str); 2] = [("#EXT#", "_xEXTx_"), ("\\", "__")];

/// Map an external username onto the local naming convention.
///
/// Idempotent: names already in local form are returned unchanged.
pub fn sanitize_username(raw: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(raw.to_string(), |name, (from, to)| name.replace(from, to))
}
