use super::ApiError;

const MAX_ID_LENGTH: usize = 128;
const MAX_PAGE: usize = 100_000;

/// Record ids are opaque, but must be non-blank and reasonably short.
pub fn validate_record_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Record ID cannot be empty"));
    }
    if trimmed.len() > MAX_ID_LENGTH {
        return Err(ApiError::validation(format!(
            "Record ID must be {} characters or less",
            MAX_ID_LENGTH
        )));
    }
    Ok(trimmed)
}

/// Pages are 1-based; a missing or zero page means the first one.
pub fn validate_page(page: Option<usize>) -> Result<usize, ApiError> {
    let page = page.unwrap_or(1).max(1);
    if page > MAX_PAGE {
        return Err(ApiError::validation(format!(
            "Invalid page: {}. Page must be at most {}",
            page, MAX_PAGE
        )));
    }
    Ok(page)
}

/// Search text is trimmed; an empty query matches everything.
pub fn normalize_search_query(query: Option<&str>) -> String {
    query.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_record_id() {
        assert_eq!(validate_record_id(" abc ").unwrap(), "abc");
        assert!(validate_record_id("   ").is_err());
        assert!(validate_record_id(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_page() {
        assert_eq!(validate_page(None).unwrap(), 1);
        assert_eq!(validate_page(Some(0)).unwrap(), 1);
        assert_eq!(validate_page(Some(3)).unwrap(), 3);
        assert!(validate_page(Some(MAX_PAGE + 1)).is_err());
    }

    #[test]
    fn test_normalize_search_query() {
        assert_eq!(normalize_search_query(None), "");
        assert_eq!(normalize_search_query(Some("  moon ")), "moon");
    }
}
