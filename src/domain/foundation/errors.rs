//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised when a wizard step refuses to advance.
///
/// The `Display` output is the message shown to the user, so it stays in
/// the language of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Campo \"{field}\" é obrigatório")]
    EmptyField { field: String },

    #[error("Campo \"{field}\" deve ter pelo menos {min} caracteres")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Conclua a etapa {step} antes de avançar")]
    PredicateFailed { step: u32, rule: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates a minimum length validation error.
    pub fn too_short(field: impl Into<String>, min: usize, actual: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates a failed predicate error for a step.
    pub fn predicate_failed(step: u32, rule: impl Into<String>) -> Self {
        ValidationError::PredicateFailed {
            step,
            rule: rule.into(),
        }
    }

    /// Returns the form field the user should focus, if the error names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::EmptyField { field } | ValidationError::TooShort { field, .. } => {
                Some(field)
            }
            ValidationError::PredicateFailed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_message_names_the_field() {
        let err = ValidationError::empty_field("project-idea");
        assert_eq!(err.to_string(), "Campo \"project-idea\" é obrigatório");
        assert_eq!(err.field(), Some("project-idea"));
    }

    #[test]
    fn too_short_message_names_field_and_threshold() {
        let err = ValidationError::too_short("project-idea", 50, 30);
        assert_eq!(
            err.to_string(),
            "Campo \"project-idea\" deve ter pelo menos 50 caracteres"
        );
    }

    #[test]
    fn predicate_failure_has_no_field() {
        let err = ValidationError::predicate_failed(2, "ai analysis present");
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains('2'));
    }
}
