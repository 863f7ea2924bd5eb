//! Result type aliases and the service result envelope.

use crate::error::{CoreError, ValidationErrors};

/// Standard Result type for Sitedesk operations
pub type AppResult<T> = Result<T, CoreError>;

/// Outcome of a business operation: either a value, or the validation
/// errors that stopped it. Services return this instead of a bare Result
/// so callers can surface field-specific messages.
#[derive(Debug)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }

    pub fn failure_with_message(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ServiceResult<U> {
        ServiceResult {
            success: self.success,
            result: self.result.map(f),
            errors: self.errors,
        }
    }

    pub fn into_result(self) -> AppResult<T> {
        if self.success {
            self.result
                .ok_or_else(|| CoreError::Internal("successful result with no value".into()))
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

impl<T> From<AppResult<T>> for ServiceResult<T> {
    fn from(result: AppResult<T>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(CoreError::Validation(errors)) => ServiceResult::failure(errors),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result = ServiceResult::success(42);
        assert!(result.is_success());
        assert_eq!(result.result(), Some(&42));
        assert_eq!(result.into_result().unwrap(), 42);
    }

    #[test]
    fn test_failure_carries_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("amount", "exceeds the remaining balance");
        let result: ServiceResult<i64> = ServiceResult::failure(errors);

        assert!(result.is_failure());
        assert!(result.errors().has_error("amount"));
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_map_preserves_failure() {
        let result: ServiceResult<i64> = ServiceResult::failure_with_message("nope");
        let mapped = result.map(|v| v * 2);
        assert!(mapped.is_failure());
        assert!(mapped.result().is_none());
    }
}
