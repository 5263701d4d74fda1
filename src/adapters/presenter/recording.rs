//! Presenter that keeps every event for later inspection.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::wizard::Notification;
use crate::ports::{Presenter, UiEvent};

/// Records emitted events in order. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<UiEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.log().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log()
            .iter()
            .filter_map(UiEvent::as_notification)
            .cloned()
            .collect()
    }

    /// Messages of every notification, in order.
    pub fn messages(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }

    pub fn clear(&self) {
        self.log().clear();
    }
}

impl Presenter for RecordingPresenter {
    fn emit(&self, event: UiEvent) {
        self.log().push(event);
    }
}
