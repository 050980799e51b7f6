//! Item type constants and field validation.

use crate::error::CoreError;

pub const ITEM_TYPE_NOTE: &str = "note";
pub const ITEM_TYPE_LINK: &str = "link";
pub const ITEM_TYPE_MEDIA: &str = "media";

/// All valid item types.
pub const VALID_ITEM_TYPES: &[&str] = &[ITEM_TYPE_NOTE, ITEM_TYPE_LINK, ITEM_TYPE_MEDIA];

/// Type assigned when a create request omits it.
pub const DEFAULT_ITEM_TYPE: &str = ITEM_TYPE_NOTE;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 300;

/// Validate an item title (non-blank, bounded length).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an item type against the known set.
pub fn validate_item_type(item_type: &str) -> Result<(), CoreError> {
    if !VALID_ITEM_TYPES.contains(&item_type) {
        return Err(CoreError::Validation(format!(
            "Invalid item type '{}'. Must be one of: {}",
            item_type,
            VALID_ITEM_TYPES.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("  \t").is_err());
    }

    #[test]
    fn long_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_title(&title).is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
    }

    #[test]
    fn known_types_accepted() {
        for t in VALID_ITEM_TYPES {
            assert!(validate_item_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_type_lists_valid_values() {
        let err = validate_item_type("video").unwrap_err().to_string();
        assert!(err.contains("note, link, media"));
    }
}
