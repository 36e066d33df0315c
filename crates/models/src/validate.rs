//! Field validation shared by the blog entities.

use crate::errors::ModelError;

/// Longest tag/category name or label accepted.
pub const MAX_LABEL_LEN: usize = 64;
/// Longest post slug accepted.
pub const MAX_URL_LEN: usize = 256;
/// Column widths of `post.title` and `post.author`.
pub const MAX_TITLE_LEN: usize = 256;
pub const MAX_AUTHOR_LEN: usize = 64;

pub fn required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

/// Non-blank and at most `max` chars.
pub fn bounded(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    required(field, value)?;
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} longer than {max} chars")));
    }
    Ok(())
}

pub fn label(field: &str, value: &str) -> Result<(), ModelError> {
    bounded(field, value, MAX_LABEL_LEN)
}

/// Post urls are path segments: lowercase ascii, digits, `-`, `_` and `.`, no leading or trailing `-`.
pub fn url_slug(url: &str) -> Result<(), ModelError> {
    if url.is_empty() {
        return Err(ModelError::Validation("url required".into()));
    }
    if url.len() > MAX_URL_LEN {
        return Err(ModelError::Validation(format!("url longer than {MAX_URL_LEN} chars")));
    }
    let charset_ok = url
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'));
    if !charset_ok || url.starts_with('-') || url.ends_with('-') {
        return Err(ModelError::Validation(
            "url must be lowercase letters, digits, '-', '_' or '.'".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(required("title", "   ").is_err());
        assert!(required("title", "Hello").is_ok());
    }

    #[test]
    fn labels_are_bounded() {
        assert!(label("display_name", &"x".repeat(MAX_LABEL_LEN)).is_ok());
        assert!(label("display_name", &"x".repeat(MAX_LABEL_LEN + 1)).is_err());
    }

    #[test]
    fn bounded_counts_chars_not_bytes() {
        assert!(bounded("title", &"é".repeat(MAX_TITLE_LEN), MAX_TITLE_LEN).is_ok());
        assert!(bounded("title", &"x".repeat(MAX_TITLE_LEN + 1), MAX_TITLE_LEN).is_err());
        assert!(bounded("author", " ", MAX_AUTHOR_LEN).is_err());
    }

    #[test]
    fn url_slug_rules() {
        assert!(url_slug("2019-12-01-hello-world").is_ok());
        assert!(url_slug("notes_on.rust").is_ok());
        assert!(url_slug("").is_err());
        assert!(url_slug("Upper-Case").is_err());
        assert!(url_slug("-leading").is_err());
        assert!(url_slug("trailing-").is_err());
        assert!(url_slug("has space").is_err());
        assert!(url_slug("a/b").is_err());
    }
}
