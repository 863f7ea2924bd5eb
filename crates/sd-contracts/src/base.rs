//! Base contract system

use sd_core::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Collect a failed check into `errors` unless the field already has one;
/// the first message per field is the one shown to the user.
pub fn require(
    errors: &mut ValidationErrors,
    field: &str,
    ok: bool,
    message: &str,
) {
    if !ok && !errors.has_error(field) {
        errors.add(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_keeps_first_message() {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "length", false, "is required");
        require(&mut errors, "length", false, "must be greater than zero");

        assert_eq!(errors.get("length").unwrap(), &vec!["is required".to_string()]);
    }

    #[test]
    fn test_require_passes_through_ok() {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", true, "is required");
        assert!(errors.is_empty());
    }
}
