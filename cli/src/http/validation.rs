//! Basic request validation.
//!
//! Only infrastructure fields are validated here. The query text itself is
//! never rejected at this layer: any string, including empty or very long
//! input, goes to the admission gate, which degrades to a safe rejection
//! instead of failing the request.

use super::models::HttpServerError;

/// Validate the session id (alphanumeric, underscore, hyphen).
pub fn validate_session_id(session_id: &str) -> Result<(), HttpServerError> {
    if session_id.is_empty() {
        return Err(HttpServerError::InvalidRequest(
            "Session ID cannot be empty".to_string(),
        ));
    }

    if session_id.len() > 100 {
        return Err(HttpServerError::InvalidRequest(format!(
            "Session ID too long ({} chars, max 100)",
            session_id.len()
        )));
    }

    if !session_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(HttpServerError::InvalidRequest(
            "Session ID can only contain alphanumeric, underscore, and hyphen characters"
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_uuid_style_ids() {
        assert!(validate_session_id("3f2c8a8e-5b7d-4a2f-9c1e-8d4b6a2f9c1e").is_ok());
        assert!(validate_session_id("session_01").is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id(&"x".repeat(101)).is_err());
    }

    #[test]
    fn rejects_path_like_ids() {
        assert!(validate_session_id("../etc/passwd").is_err());
        assert!(validate_session_id("id with spaces").is_err());
    }
}
