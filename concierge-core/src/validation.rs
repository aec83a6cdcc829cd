use crate::{CoreError, CoreResult};

/// Returns the trimmed name, rejecting blank input.
pub fn validate_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError("name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn validate_email(email: &str) -> CoreResult<String> {
    let trimmed = email.trim();
    if !trimmed.contains('@') {
        return Err(CoreError::ValidationError(format!("invalid email address: {}", trimmed)));
    }
    Ok(trimmed.to_string())
}

pub fn validate_note(body: &str, max_chars: usize) -> CoreResult<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError("note must not be empty".to_string()));
    }
    let len = trimmed.chars().count();
    if len > max_chars {
        return Err(CoreError::ValidationError(format!(
            "note is {} characters, limit is {}",
            len, max_chars
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Villa Azul ").unwrap(), "Villa Azul");
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("james@whitfield.com").is_ok());
        assert!(validate_email("james.whitfield.com").is_err());
    }

    #[test]
    fn test_validate_note_limits() {
        assert!(validate_note("", 10).is_err());
        assert!(validate_note("0123456789", 10).is_ok());
        assert!(validate_note("0123456789X", 10).is_err());
    }
}
