//! # Claims Matching
//!
//! Member discounts are gated on the authenticated caller's token claims.
//! Claims arrive as the decoded JSON payload of the token; requirements are
//! flat `key → value` pairs where a key may reach into nested objects with
//! dots.
//!
//! ```text
//! claims:   { "sub": "u-1", "app_metadata": { "plan": "gold" } }
//! required: { "app_metadata.plan": "gold" }                → match
//! required: { "app_metadata.plan": "silver" }              → no match
//! required: { "app_metadata.plan.tier": "1" }              → no match
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Decoded token claims of the caller.
pub type Claims = Map<String, Value>;

/// Returns true when every required claim is present with the required value.
///
/// Only string leaves can match. An empty requirement set matches any claims.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use cashline_core::claims::{has_claims, Claims};
///
/// let claims: Claims = serde_json::from_str(r#"{"app_metadata":{"plan":"gold"}}"#).unwrap();
/// let required = HashMap::from([("app_metadata.plan".to_string(), "gold".to_string())]);
/// assert!(has_claims(&claims, &required));
/// ```
pub fn has_claims(claims: &Claims, required: &HashMap<String, String>) -> bool {
    required
        .iter()
        .all(|(path, expected)| lookup(claims, path) == Some(expected.as_str()))
}

fn lookup<'a>(claims: &'a Claims, path: &str) -> Option<&'a str> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = claims.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    current.as_str()
}
