//! Wizard domain - the step-by-step grant application session.

mod analysis;
mod chat;
mod notification;
mod processing;
mod project_data;
mod session;
mod snapshot;
mod step;
mod validation;

pub use analysis::{AnalysisResults, Diagnostic};
pub use chat::{ChatMessage, ChatRole, CHAT_GREETING};
pub use notification::{Notification, NotificationLevel};
pub use processing::{ProcessingFlag, ProcessingGuard};
pub use project_data::{
    FormFields, MaterialFile, ProjectData, FIELD_BUDGET, FIELD_IDEA, FIELD_LOCATION,
};
pub use session::{StepProgress, WizardSession};
pub use snapshot::{RestoreReport, SessionSnapshot, StoredSession};
pub use step::WizardStep;
pub use validation::{RuleTable, ValidationRule};
