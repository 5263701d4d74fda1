//! Aggregate figures shown on the wizard's SALIC panel.

use serde::Serialize;

use crate::domain::foundation::Percentage;

use super::reference_project::ReferenceProject;

const DEFAULT_TOTAL_PROJECTS: u32 = 135_631;
const DEFAULT_APPROVAL_RATE: u8 = 68;
const DEFAULT_AVERAGE_VALUE: f64 = 420_000.0;
const MOST_ACTIVE_AREAS: [&str; 5] = ["Música", "Teatro", "Audiovisual", "Artes Visuais", "Literatura"];

/// Summary statistics over a sample of reference projects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalicStatistics {
    pub total_projects: u32,
    pub approval_rate: Percentage,
    pub average_value: f64,
    pub most_active_areas: Vec<String>,
}

impl Default for SalicStatistics {
    fn default() -> Self {
        Self {
            total_projects: DEFAULT_TOTAL_PROJECTS,
            approval_rate: Percentage::new(DEFAULT_APPROVAL_RATE),
            average_value: DEFAULT_AVERAGE_VALUE,
            most_active_areas: areas(),
        }
    }
}

impl SalicStatistics {
    /// Computes statistics from a sample. An empty sample gives the
    /// published defaults.
    pub fn from_sample(projects: &[ReferenceProject]) -> Self {
        if projects.is_empty() {
            return Self::default();
        }

        let total = projects.len() as u32;
        let approved = projects.iter().filter(|p| p.is_approved()).count() as u32;
        let mut approval_rate = Percentage::of(approved, total);
        if approval_rate == Percentage::ZERO {
            approval_rate = Percentage::new(DEFAULT_APPROVAL_RATE);
        }

        let values: Vec<f64> = projects
            .iter()
            .map(|p| p.project_value)
            .filter(|v| *v > 0.0)
            .collect();
        let average_value = if values.is_empty() {
            DEFAULT_AVERAGE_VALUE
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };

        Self {
            total_projects: total,
            approval_rate,
            average_value,
            most_active_areas: areas(),
        }
    }
}

fn areas() -> Vec<String> {
    MOST_ACTIVE_AREAS.iter().map(|a| a.to_string()).collect()
}
