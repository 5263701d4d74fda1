//! Per-step validation rules.
//!
//! Each step owns an ordered list of rules. Rules are checked in order and
//! the first failure stops the check. A step with no rules always passes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::ValidationError;

use super::project_data::{FormFields, FIELD_IDEA};
use super::session::WizardSession;

type SessionPredicate = Arc<dyn Fn(&WizardSession) -> bool + Send + Sync>;

/// One condition a step must satisfy before the wizard advances.
#[derive(Clone)]
pub enum ValidationRule {
    /// Every listed field must be non-empty after trimming.
    RequiredFields(Vec<String>),
    /// Each listed field must have at least the given number of characters
    /// after trimming.
    MinLength(BTreeMap<String, usize>),
    /// Named condition over the session state.
    Predicate { name: String, check: SessionPredicate },
}

impl ValidationRule {
    pub fn required(fields: &[&str]) -> Self {
        ValidationRule::RequiredFields(fields.iter().map(|f| f.to_string()).collect())
    }

    pub fn min_length(field: &str, min: usize) -> Self {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(field.to_string(), min);
        ValidationRule::MinLength(thresholds)
    }

    pub fn predicate<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&WizardSession) -> bool + Send + Sync + 'static,
    {
        ValidationRule::Predicate {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Checks this rule for the given step.
    pub fn check(
        &self,
        step: u32,
        session: &WizardSession,
        form: &FormFields,
    ) -> Result<(), ValidationError> {
        match self {
            ValidationRule::RequiredFields(fields) => {
                for field in fields {
                    if form.trimmed(field).is_empty() {
                        return Err(ValidationError::empty_field(field.as_str()));
                    }
                }
                Ok(())
            }
            ValidationRule::MinLength(thresholds) => {
                for (field, min) in thresholds {
                    let actual = form.trimmed(field).chars().count();
                    if actual < *min {
                        return Err(ValidationError::too_short(field.as_str(), *min, actual));
                    }
                }
                Ok(())
            }
            ValidationRule::Predicate { name, check } => {
                if check(session) {
                    Ok(())
                } else {
                    Err(ValidationError::predicate_failed(step, name.as_str()))
                }
            }
        }
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::RequiredFields(fields) => {
                f.debug_tuple("RequiredFields").field(fields).finish()
            }
            ValidationRule::MinLength(thresholds) => {
                f.debug_tuple("MinLength").field(thresholds).finish()
            }
            ValidationRule::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish()
            }
        }
    }
}

/// Validation rules keyed by 1-based step number.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: BTreeMap<u32, Vec<ValidationRule>>,
}

impl RuleTable {
    /// A table with no rules: every step passes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard grant-wizard rules.
    pub fn standard(idea_min_length: usize) -> Self {
        Self::empty()
            .with_rule(1, ValidationRule::required(&[FIELD_IDEA]))
            .with_rule(1, ValidationRule::min_length(FIELD_IDEA, idea_min_length))
            .with_rule(
                2,
                ValidationRule::predicate("ai analysis present", |s| {
                    s.analysis_results.has_ai_analysis()
                }),
            )
            .with_rule(3, ValidationRule::predicate("always", |_| true))
            .with_rule(
                4,
                ValidationRule::predicate("diagnostic present", |s| {
                    s.analysis_results.has_diagnostic()
                }),
            )
            .with_rule(
                5,
                ValidationRule::predicate("chat has at least two messages", |s| {
                    s.chat_history.len() >= 2
                }),
            )
    }

    /// Appends a rule to a step.
    pub fn with_rule(mut self, step: u32, rule: ValidationRule) -> Self {
        self.rules.entry(step).or_default().push(rule);
        self
    }

    /// Rules for a step, in evaluation order.
    pub fn rules_for(&self, step: u32) -> &[ValidationRule] {
        self.rules.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Checks every rule of a step in order, stopping at the first failure.
    pub fn validate(
        &self,
        step: u32,
        session: &WizardSession,
        form: &FormFields,
    ) -> Result<(), ValidationError> {
        for rule in self.rules_for(step) {
            rule.check(step, session, form)?;
        }
        Ok(())
    }
}
