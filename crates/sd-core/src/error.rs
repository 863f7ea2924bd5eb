//! Core error types for Sitedesk.

use std::collections::HashMap;
use thiserror::Error;

/// Core error type for all Sitedesk operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Document generation failed: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::NotFound { .. } => 404,
            CoreError::Unauthorized { .. } => 401,
            CoreError::Validation(_) => 422,
            CoreError::Conflict { .. } => 409,
            CoreError::Database(_) | CoreError::Internal(_) => 500,
            CoreError::Document(_) | CoreError::Config(_) => 500,
        }
    }
}

/// Field-keyed validation errors collected before any persistence
/// or document generation happens.
#[derive(Error, Debug, Default, Clone)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    /// The first message recorded, in stable field order. Handlers surface
    /// exactly one validation message at a time.
    pub fn first_message(&self) -> Option<String> {
        if let Some(base) = self.base_errors.first() {
            return Some(base.clone());
        }
        let mut fields: Vec<&String> = self.errors.keys().collect();
        fields.sort();
        fields
            .first()
            .and_then(|f| self.errors[*f].first().map(|m| format!("{} {}", f, m)))
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        let mut fields: Vec<&String> = self.errors.keys().collect();
        fields.sort();
        for field in fields {
            for msg in &self.errors[field] {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("name", "is required");
        errors.add("length", "must be greater than zero");

        assert!(!errors.is_empty());
        assert!(errors.has_error("name"));
        assert_eq!(errors.get("name").unwrap().len(), 1);
    }

    #[test]
    fn test_first_message_prefers_base() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "is required");
        errors.add_base("estimate has no materials");

        assert_eq!(
            errors.first_message().as_deref(),
            Some("estimate has no materials")
        );
    }

    #[test]
    fn test_full_messages_are_stable() {
        let mut errors = ValidationErrors::new();
        errors.add("breadth", "must be greater than zero");
        errors.add("name", "is required");

        assert_eq!(
            errors.full_messages(),
            vec![
                "breadth must be greater than zero".to_string(),
                "name is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_status_codes() {
        let err = CoreError::NotFound {
            entity: "Client",
            field: "id",
            value: "7".into(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            CoreError::Conflict {
                message: "duplicate".into()
            }
            .status_code(),
            409
        );
    }
}
