//! Section and post identifiers.
//!
//! Ids double as JSON keys and show up in menus, so they are kept to plain
//! ASCII: a leading letter followed by letters and digits.

use crate::error::{PostbookError, Result};

pub fn validate_id(id: &str) -> Result<&str> {
    let first = id
        .chars()
        .next()
        .ok_or_else(|| PostbookError::InvalidInput("id cannot be empty".to_string()))?;

    if !first.is_ascii_alphabetic() {
        return Err(PostbookError::InvalidInput(format!(
            "id '{}' must start with a letter",
            id
        )));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PostbookError::InvalidInput(format!(
            "id '{}' may only contain ASCII letters and digits",
            id
        )));
    }

    Ok(id)
}

/// Rejects empty (or whitespace-only) required text fields.
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PostbookError::InvalidInput(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alphanumeric_ids() {
        assert!(validate_id("basics").is_ok());
        assert!(validate_id("post2").is_ok());
        assert!(validate_id("A1b2").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = validate_id("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_leading_digit() {
        let err = validate_id("2fast").unwrap_err();
        assert!(err.to_string().contains("start with a letter"));
    }

    #[test]
    fn rejects_punctuation_and_non_ascii() {
        assert!(validate_id("my-post").is_err());
        assert!(validate_id("my post").is_err());
        assert!(validate_id("основы").is_err());
        assert!(validate_id("caféA").is_err());
    }

    #[test]
    fn require_text_trims() {
        assert!(require_text("title", "  ").is_err());
        assert!(require_text("title", "Intro").is_ok());
    }
}
