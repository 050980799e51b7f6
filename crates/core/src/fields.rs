//! Helpers for partial-update payloads.
//!
//! Update DTOs distinguish three states for a nullable column:
//!
//! | JSON                 | Rust                 | Effect              |
//! |----------------------|----------------------|---------------------|
//! | field absent         | `None`               | column untouched    |
//! | `null` / `""`        | `Some(None)`         | column set to NULL  |
//! | `"value"`            | `Some(Some(value))`  | column set to value |

use serde::{Deserialize, Deserializer};

/// Collapse falsy text (missing or the empty string) to `None`.
///
/// Any other value is kept exactly as given. Whitespace is not falsy: a
/// display name of `"   "` is stored as `"   "`.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => None,
    }
}

/// Normalize a tri-state update field. Absent stays absent; present values
/// go through [`normalize_optional_text`].
pub fn normalize_field_update(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|inner| normalize_optional_text(inner.as_deref()))
}

/// Serde adapter that keeps "present but null" apart from "absent".
///
/// Use together with `#[serde(default)]`:
///
/// ```
/// use serde::Deserialize;
/// use thoughtcache_core::fields::double_option;
///
/// #[derive(Deserialize)]
/// struct Patch {
///     #[serde(default, deserialize_with = "double_option")]
///     avatar_url: Option<Option<String>>,
/// }
///
/// let p: Patch = serde_json::from_str(r#"{"avatar_url": null}"#).unwrap();
/// assert_eq!(p.avatar_url, Some(None));
/// let p: Patch = serde_json::from_str("{}").unwrap();
/// assert_eq!(p.avatar_url, None);
/// ```
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
