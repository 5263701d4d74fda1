//! Presenter Port - Interface for the user-facing surface.
//!
//! The core never renders anything. It describes what the user should see
//! as `UiEvent`s and hands them to a presenter.

use serde::Serialize;

use crate::domain::salic::{ReferenceProject, SalicStatistics};
use crate::domain::wizard::{ChatMessage, Notification, StepProgress};

/// Port receiving presentation events.
pub trait Presenter: Send + Sync {
    fn emit(&self, event: UiEvent);
}

/// Which status area of the screen a panel event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelTarget {
    Analysis,
    SimilarProjects,
    ProjectDetail,
}

/// State of a status panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Running { message: String },
    Completed { message: String },
    Failed { message: String },
    /// Upstream had nothing to offer; the wizard carries on without it.
    Unavailable { message: String },
    NotFound { id: String },
}

/// Something the user should see.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    Notification(Notification),
    Progress(StepProgress),
    Panel {
        target: PanelTarget,
        panel: PanelState,
    },
    /// Keyboard focus should move to a form field.
    FocusField { field: String },
    AnalysisResult { text: String },
    SimilarProjects { projects: Vec<ReferenceProject> },
    ProjectDetail { project: Box<ReferenceProject> },
    Statistics { statistics: SalicStatistics },
    ChatMessage(ChatMessage),
}

impl UiEvent {
    pub fn panel(target: PanelTarget, panel: PanelState) -> Self {
        UiEvent::Panel { target, panel }
    }

    /// The notification carried by this event, if any.
    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            UiEvent::Notification(n) => Some(n),
            _ => None,
        }
    }
}
