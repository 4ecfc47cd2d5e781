// Validation utilities
use crate::error::{Error, Result};
use tracing::debug;

/// Shortest query or tag value that triggers a search, in characters
pub const MIN_SEARCH_LENGTH: usize = 3;

/// Validate a main query: either empty (clears the search) or at least `MIN_SEARCH_LENGTH` characters
pub fn validate_query(query: &str) -> Result<()> {
    let len = query.chars().count();
    if len == 0 || len >= MIN_SEARCH_LENGTH {
        return Ok(());
    }

    debug!("Rejected query of {} characters", len);
    Err(Error::Validation(format!(
        "Search needs at least {MIN_SEARCH_LENGTH} characters, got {len}"
    )))
}

/// Validate a tag value: at least `MIN_SEARCH_LENGTH` characters, never empty
pub fn validate_tag_value(value: &str) -> Result<()> {
    let len = value.chars().count();
    if len >= MIN_SEARCH_LENGTH {
        return Ok(());
    }

    debug!("Rejected tag value of {} characters", len);
    Err(Error::Validation(format!(
        "Tag needs at least {MIN_SEARCH_LENGTH} characters, got {len}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert!(validate_query("").is_ok());
        assert!(validate_query("tar").is_ok());
        assert!(validate_query("tarte aux pommes").is_ok());

        assert!(validate_query("t").is_err());
        assert!(validate_query("po").is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Two characters, four bytes
        assert!(validate_query("éé").is_err());
        assert!(validate_tag_value("été").is_ok());
    }

    #[test]
    fn test_validate_tag_value() {
        assert!(validate_tag_value("").is_err());
        assert!(validate_tag_value("ai").is_err());
        assert!(validate_tag_value("ail").is_ok());
    }
}
