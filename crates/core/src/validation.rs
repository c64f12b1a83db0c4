//! Field-level validation shared by the contract type and template save paths.

use crate::error::CoreError;

/// Maximum length for contract type, template and placeholder names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;

/// Validate a field that must hold non-blank text within `max_len` characters.
pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_length(field, value, max_len)
}

/// Validate that a field holds at most `max_len` characters (may be empty).
pub fn validate_max_length(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max_len} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate an optional text field for a save payload.
///
/// On create (`creating == true`) the field must be present. On update an
/// absent field keeps its stored value, but a supplied one must still be valid.
pub fn validate_save_field(
    field: &str,
    value: Option<&str>,
    creating: bool,
    max_len: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_text(field, v, max_len),
        None if creating => Err(CoreError::Validation(format!("{field} is required"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_rejected() {
        let err = validate_text("name", "   ", MAX_NAME_LENGTH).unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn too_long_text_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = validate_text("name", &long, MAX_NAME_LENGTH).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    #[test]
    fn boundary_length_passes() {
        let exact = "x".repeat(MAX_NAME_LENGTH);
        assert!(validate_text("name", &exact, MAX_NAME_LENGTH).is_ok());
    }

    #[test]
    fn missing_field_rejected_on_create_only() {
        let err = validate_save_field("name", None, true, MAX_NAME_LENGTH).unwrap_err();
        assert!(err.to_string().contains("name is required"));
        assert!(validate_save_field("name", None, false, MAX_NAME_LENGTH).is_ok());
    }

    #[test]
    fn supplied_blank_rejected_on_update() {
        assert!(validate_save_field("name", Some(""), false, MAX_NAME_LENGTH).is_err());
    }
}
