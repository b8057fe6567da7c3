use crate::error::ValidationError;

/// Shortest query accepted by the search prompt
pub const MIN_QUERY_LENGTH: usize = 2;

/// Check a query before it reaches the network and return it trimmed
pub fn validate_query(query: &str) -> Result<&str, ValidationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    if trimmed.chars().count() < MIN_QUERY_LENGTH {
        return Err(ValidationError::TooShort { min: MIN_QUERY_LENGTH });
    }
    Ok(trimmed)
}
