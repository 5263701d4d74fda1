//! Results produced by the analysis steps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Strategic diagnostic of the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Viability score out of 10.
    pub viability: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl Diagnostic {
    /// Builds the standard diagnostic for a viability score.
    pub fn with_viability(viability: u8) -> Self {
        Self {
            viability: viability.min(10),
            strengths: vec![
                "Proposta culturalmente relevante".to_string(),
                "Potencial impacto social".to_string(),
                "Alinhamento estratégico".to_string(),
            ],
            improvements: vec![
                "Detalhar cronograma".to_string(),
                "Especificar público-alvo".to_string(),
                "Incluir métricas".to_string(),
            ],
        }
    }
}

/// Named analysis results. `ai_analysis` and `diagnostic` are the ones the
/// wizard reads; anything else is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AnalysisResults {
    pub fn has_ai_analysis(&self) -> bool {
        self.ai_analysis.as_deref().is_some_and(|a| !a.is_empty())
    }

    pub fn has_diagnostic(&self) -> bool {
        self.diagnostic.is_some()
    }

    /// Overwrites the results present in a persisted object, key by key.
    pub fn merge_from(&mut self, stored: &Map<String, Value>) {
        for (key, value) in stored {
            match key.as_str() {
                "ai_analysis" => match value {
                    Value::Null => self.ai_analysis = None,
                    Value::String(s) => self.ai_analysis = Some(s.clone()),
                    _ => tracing::debug!("ignoring malformed ai_analysis"),
                },
                "diagnostic" => match value {
                    Value::Null => self.diagnostic = None,
                    other => match serde_json::from_value(other.clone()) {
                        Ok(diagnostic) => self.diagnostic = Some(diagnostic),
                        Err(e) => tracing::debug!(error = %e, "ignoring malformed diagnostic"),
                    },
                },
                other => {
                    self.extra.insert(other.to_string(), value.clone());
                }
            }
        }
    }
}
