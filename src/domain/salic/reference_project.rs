//! Reference project value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Percentage, ProjectId};

use super::money::format_brl;

/// A funded cultural project from the SALIC dataset, already normalized.
///
/// Field names on the wire follow the dataset's Portuguese vocabulary so
/// persisted sessions stay readable by the web front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceProject {
    pub id: ProjectId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "proponente")]
    pub proponent: String,
    pub area: String,
    #[serde(rename = "segmento")]
    pub segment: String,
    #[serde(rename = "uf")]
    pub state: String,
    #[serde(rename = "municipio")]
    pub municipality: String,
    #[serde(rename = "valor_aprovado")]
    pub approved_value: f64,
    #[serde(rename = "valor_captado")]
    pub raised_value: f64,
    #[serde(rename = "valor_projeto")]
    pub project_value: f64,
    #[serde(rename = "situacao")]
    pub status: String,
    #[serde(rename = "ano_projeto", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
    #[serde(rename = "objetivos")]
    pub objectives: String,
    #[serde(rename = "justificativa")]
    pub justification: String,
}

impl Default for ReferenceProject {
    fn default() -> Self {
        Self {
            id: ProjectId::unknown(),
            name: String::new(),
            proponent: String::new(),
            area: String::new(),
            segment: String::new(),
            state: String::new(),
            municipality: String::new(),
            approved_value: 0.0,
            raised_value: 0.0,
            project_value: 0.0,
            status: String::new(),
            year: None,
            synopsis: String::new(),
            objectives: String::new(),
            justification: String::new(),
        }
    }
}

impl ReferenceProject {
    /// Share of the approved amount already raised, rounded.
    pub fn raised_percentage(&self) -> Percentage {
        if self.approved_value <= 0.0 {
            return Percentage::ZERO;
        }
        let ratio = (self.raised_value / self.approved_value * 100.0).round();
        if !ratio.is_finite() {
            return Percentage::ZERO;
        }
        Percentage::new(ratio.clamp(0.0, 100.0) as u8)
    }

    /// True when the dataset status reads as approved or in execution.
    pub fn is_approved(&self) -> bool {
        let status = self.status.to_lowercase();
        status.contains("aprovado") || status.contains("execu")
    }

    /// Approved amount formatted in reais.
    pub fn approved_display(&self) -> String {
        format_brl(self.approved_value)
    }

    /// Raised amount formatted in reais.
    pub fn raised_display(&self) -> String {
        format_brl(self.raised_value)
    }
}
