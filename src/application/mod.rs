//! Application layer - use cases orchestrating domain and ports.
//!
//! - `WizardNavigator` - step transitions, persistence, chat and detail views
//! - `StepActionDispatcher` - side effect of entering each step

mod dispatcher;
mod navigator;

pub use dispatcher::{ActionOutcome, StepActionDispatcher};
pub use navigator::{
    AdvanceOutcome, DetailOutcome, RestoreOutcome, RetreatOutcome, WizardNavigator,
};
