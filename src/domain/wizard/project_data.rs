//! Project data collected by the wizard and the raw form it comes from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::salic::{format_brl, parse_money};

/// Form field holding the free-text project idea.
pub const FIELD_IDEA: &str = "project-idea";
/// Form field holding the estimated budget.
pub const FIELD_BUDGET: &str = "estimated-budget";
/// Form field holding the project location.
pub const FIELD_LOCATION: &str = "project-location";

/// A supporting file the user attached. Only its metadata is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialFile {
    pub name: String,
    pub size: u64,
}

/// What the user has told the wizard about the project so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectData {
    pub idea: String,
    pub budget: Option<f64>,
    pub location: String,
    pub materials: Vec<MaterialFile>,
    pub generated_sections: BTreeMap<String, String>,
}

impl ProjectData {
    /// Overwrites the fields present in a persisted object, one key at a
    /// time. Keys with an unexpected shape leave the current value alone.
    pub fn merge_from(&mut self, stored: &Map<String, Value>) {
        for (key, value) in stored {
            match key.as_str() {
                "idea" => {
                    if let Some(s) = value.as_str() {
                        self.idea = s.to_string();
                    }
                }
                "budget" => self.budget = budget_from_value(value),
                "location" => {
                    if let Some(s) = value.as_str() {
                        self.location = s.to_string();
                    }
                }
                "materials" => {
                    if let Ok(materials) = serde_json::from_value(value.clone()) {
                        self.materials = materials;
                    }
                }
                "generated_sections" => {
                    if let Ok(sections) = serde_json::from_value(value.clone()) {
                        self.generated_sections = sections;
                    }
                }
                other => tracing::debug!(key = other, "ignoring unknown project data key"),
            }
        }
    }

    /// Builds the text sent to the suggestion relay.
    pub fn analysis_prompt(&self) -> String {
        let mut prompt = format!("Ideia do projeto: {}", self.idea);
        if let Some(budget) = self.budget {
            prompt.push_str(&format!("\nOrçamento estimado: {}", format_brl(budget)));
        }
        if !self.location.is_empty() {
            prompt.push_str(&format!("\nLocal: {}", self.location));
        }
        prompt
    }
}

fn budget_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(parse_money(other)),
    }
}

/// Raw form values keyed by field id, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: BTreeMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Raw value, or the empty string for a field that is not on the form.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Value with surrounding whitespace removed.
    pub fn trimmed(&self, field: &str) -> &str {
        self.get(field).trim()
    }

    /// Rebuilds the step 1 form from stored project data.
    pub fn from_project_data(data: &ProjectData) -> Self {
        let mut form = Self::new();
        form.set(FIELD_IDEA, data.idea.clone());
        if let Some(budget) = data.budget {
            form.set(FIELD_BUDGET, budget.to_string());
        }
        form.set(FIELD_LOCATION, data.location.clone());
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_known_keys_only() {
        let mut data = ProjectData {
            idea: "old".into(),
            location: "Recife".into(),
            ..ProjectData::default()
        };
        let stored = json!({"idea": "new idea", "unknown": 1});
        data.merge_from(stored.as_object().unwrap());

        assert_eq!(data.idea, "new idea");
        assert_eq!(data.location, "Recife");
    }

    #[test]
    fn merge_reads_budget_from_number_or_text() {
        let mut data = ProjectData::default();
        data.merge_from(json!({"budget": "R$ 50.000,00"}).as_object().unwrap());
        assert_eq!(data.budget, Some(50000.0));

        data.merge_from(json!({"budget": 1200}).as_object().unwrap());
        assert_eq!(data.budget, Some(1200.0));

        data.merge_from(json!({"budget": null}).as_object().unwrap());
        assert_eq!(data.budget, None);
    }

    #[test]
    fn merge_skips_malformed_materials() {
        let mut data = ProjectData {
            materials: vec![MaterialFile { name: "a.pdf".into(), size: 10 }],
            ..ProjectData::default()
        };
        data.merge_from(json!({"materials": "nope"}).as_object().unwrap());
        assert_eq!(data.materials.len(), 1);
    }

    #[test]
    fn analysis_prompt_includes_optional_fields() {
        let data = ProjectData {
            idea: "Oficinas de teatro".into(),
            budget: Some(80000.0),
            location: "Salvador/BA".into(),
            ..ProjectData::default()
        };
        let prompt = data.analysis_prompt();
        assert!(prompt.contains("Oficinas de teatro"));
        assert!(prompt.contains("R$ 80.000"));
        assert!(prompt.contains("Salvador/BA"));

        let bare = ProjectData::default().analysis_prompt();
        assert!(!bare.contains("Orçamento"));
    }

    #[test]
    fn form_fields_default_to_empty() {
        let form = FormFields::new().with(FIELD_IDEA, "  ideia  ");
        assert_eq!(form.trimmed(FIELD_IDEA), "ideia");
        assert_eq!(form.get(FIELD_LOCATION), "");
    }

    #[test]
    fn form_round_trips_from_project_data() {
        let data = ProjectData {
            idea: "Festival".into(),
            budget: Some(1000.0),
            ..ProjectData::default()
        };
        let form = FormFields::from_project_data(&data);
        assert_eq!(form.get(FIELD_IDEA), "Festival");
        assert_eq!(form.get(FIELD_BUDGET), "1000");
    }
}
