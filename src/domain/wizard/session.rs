//! WizardSession aggregate - the single in-progress grant application.

use serde::Serialize;

use crate::domain::foundation::Percentage;
use crate::domain::salic::{parse_money_str, ReferenceProject};

use super::analysis::AnalysisResults;
use super::chat::ChatMessage;
use super::processing::ProcessingFlag;
use super::project_data::{FormFields, ProjectData, FIELD_BUDGET, FIELD_IDEA, FIELD_LOCATION};
use super::step::WizardStep;

/// Progress of the wizard as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub current: u32,
    pub total: u32,
    pub percent: Percentage,
    pub step_name: String,
    pub next_label: String,
    pub can_go_back: bool,
    pub is_last_step: bool,
}

/// The wizard's state.
///
/// # Invariants
///
/// - `1 <= current_step <= total_steps`
/// - `total_steps` never changes after construction
#[derive(Debug, Clone)]
pub struct WizardSession {
    current_step: u32,
    total_steps: u32,
    pub project_data: ProjectData,
    pub analysis_results: AnalysisResults,
    pub similar_projects: Vec<ReferenceProject>,
    pub chat_history: Vec<ChatMessage>,
    processing: ProcessingFlag,
}

impl WizardSession {
    /// Creates a fresh session on step 1.
    pub fn new(total_steps: u32) -> Self {
        Self {
            current_step: 1,
            total_steps: total_steps.max(1),
            project_data: ProjectData::default(),
            analysis_results: AnalysisResults::default(),
            similar_projects: Vec::new(),
            chat_history: Vec::new(),
            processing: ProcessingFlag::new(),
        }
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// The named step for the current position, if the flow defines one.
    pub fn wizard_step(&self) -> Option<WizardStep> {
        WizardStep::from_number(self.current_step)
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_set()
    }

    /// Handle on the shared processing flag.
    pub fn processing_flag(&self) -> &ProcessingFlag {
        &self.processing
    }

    /// Moves one step forward. Returns the new step, or `None` on the last.
    pub fn advance(&mut self) -> Option<u32> {
        if self.current_step >= self.total_steps {
            return None;
        }
        self.current_step += 1;
        Some(self.current_step)
    }

    /// Moves one step back. Returns the new step, or `None` on the first.
    pub fn retreat(&mut self) -> Option<u32> {
        if self.current_step <= 1 {
            return None;
        }
        self.current_step -= 1;
        Some(self.current_step)
    }

    /// Copies the editable fields of the current step into the project data.
    /// Only step 1 has editable fields.
    pub fn record_step_data(&mut self, form: &FormFields) {
        if self.current_step != 1 {
            return;
        }
        self.project_data.idea = form.trimmed(FIELD_IDEA).to_string();
        let budget = form.trimmed(FIELD_BUDGET);
        self.project_data.budget = if budget.is_empty() {
            None
        } else {
            Some(parse_money_str(budget))
        };
        self.project_data.location = form.trimmed(FIELD_LOCATION).to_string();
    }

    /// Restores a persisted step number. Values outside `1..=total_steps`
    /// reset to step 1. Returns whether the value was accepted.
    pub fn restore_step(&mut self, step: Option<i64>) -> bool {
        match step {
            Some(n) if n >= 1 && n <= i64::from(self.total_steps) => {
                self.current_step = n as u32;
                true
            }
            _ => {
                self.current_step = 1;
                false
            }
        }
    }

    /// Discards everything and returns to step 1. The processing flag is
    /// shared with the navigator and survives the reset.
    pub fn reset(&mut self) {
        let processing = self.processing.clone();
        *self = Self::new(self.total_steps);
        self.processing = processing;
    }

    pub fn progress(&self) -> StepProgress {
        let step = self.wizard_step();
        StepProgress {
            current: self.current_step,
            total: self.total_steps,
            percent: Percentage::of(self.current_step, self.total_steps),
            step_name: step
                .map(|s| s.display_name().to_string())
                .unwrap_or_else(|| format!("Etapa {}", self.current_step)),
            next_label: step
                .map(|s| s.next_label().to_string())
                .unwrap_or_else(|| "Próximo".to_string()),
            can_go_back: !self.is_first_step(),
            is_last_step: self.is_last_step(),
        }
    }
}
