//! Tag name and color validation.
//!
//! Tag names are unique per user, compared case-insensitively. The stored
//! name keeps the casing the user typed (after trimming).

use crate::error::CoreError;

/// Maximum tag name length in characters.
pub const MAX_TAG_NAME_LEN: usize = 50;

/// Trim surrounding whitespace from a tag name.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_string()
}

/// Validate a tag name after normalization.
pub fn validate_tag_name(name: &str) -> Result<(), CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Tag name must not be empty".into()));
    }
    if name.chars().count() > MAX_TAG_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Tag name must be at most {MAX_TAG_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a hex color code (`#RGB` or `#RRGGBB`).
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let valid = color.strip_prefix('#').is_some_and(|hex| {
        (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    });
    if !valid {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Expected #RGB or #RRGGBB"
        )));
    }
    Ok(())
}
