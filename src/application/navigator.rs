//! WizardNavigator - owns the session and drives step transitions.
//!
//! Every user action goes through here: validation, step data recording,
//! the step action, persistence and the progress events the presenter
//! needs to redraw.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;

use crate::domain::foundation::{ProjectId, ValidationError};
use crate::domain::salic::ReferenceProject;
use crate::domain::wizard::{
    ChatMessage, FormFields, Notification, ProcessingFlag, RuleTable, SessionSnapshot,
    StepProgress, WizardSession,
};
use crate::ports::{
    PanelState, PanelTarget, Presenter, ReferenceCatalog, SessionStore, SessionStoreError,
    SuggestionRelay, UiEvent,
};

use super::dispatcher::{ActionOutcome, StepActionDispatcher};

/// Result of a request to move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Another transition is in flight; nothing changed.
    Busy,
    /// The current step failed validation.
    Blocked(ValidationError),
    Advanced {
        from: u32,
        to: u32,
        action: ActionOutcome,
    },
    /// The last step was confirmed.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatOutcome {
    Retreated { from: u32, to: u32 },
    AtFirstStep,
}

/// Result of loading the stored session at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing stored.
    Fresh,
    Restored { step: u32 },
    /// Data restored but the stored step was invalid; back on step 1.
    StepOutOfRange,
    /// Storage could not be read; defaults kept.
    Unreadable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Shown(ReferenceProject),
    NotFound,
    Failed,
}

/// Drives one wizard session.
pub struct WizardNavigator {
    session: AsyncMutex<WizardSession>,
    processing: ProcessingFlag,
    rules: RuleTable,
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn ReferenceCatalog>,
    presenter: Arc<dyn Presenter>,
    dispatcher: StepActionDispatcher,
    persistence_enabled: AtomicBool,
    chat_reply_delay: Duration,
}

impl WizardNavigator {
    pub const DEFAULT_IDEA_MIN_LENGTH: usize = 50;
    pub const DEFAULT_CHAT_REPLY_DELAY: Duration = Duration::from_millis(1500);

    /// Creates a navigator on a fresh session with the standard rules.
    pub fn new(
        total_steps: u32,
        store: Arc<dyn SessionStore>,
        catalog: Arc<dyn ReferenceCatalog>,
        relay: Arc<dyn SuggestionRelay>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let session = WizardSession::new(total_steps);
        let processing = session.processing_flag().clone();
        let dispatcher = StepActionDispatcher::new(relay, catalog.clone(), presenter.clone());
        Self {
            session: AsyncMutex::new(session),
            processing,
            rules: RuleTable::standard(Self::DEFAULT_IDEA_MIN_LENGTH),
            store,
            catalog,
            presenter,
            dispatcher,
            persistence_enabled: AtomicBool::new(true),
            chat_reply_delay: Self::DEFAULT_CHAT_REPLY_DELAY,
        }
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_chat_reply_delay(mut self, delay: Duration) -> Self {
        self.chat_reply_delay = delay;
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.with_search_timeout(timeout);
        self
    }

    /// Makes the step actions' random draws reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.dispatcher = self.dispatcher.with_seed(seed);
        self
    }

    /// Loads the stored session, if any, and announces the resulting step.
    pub async fn restore(&self) -> RestoreOutcome {
        let outcome = match self.store.load().await {
            Ok(None) => RestoreOutcome::Fresh,
            Ok(Some(stored)) => {
                let mut session = self.session.lock().await;
                let report = stored.apply_to(&mut session);
                if report.step_restored {
                    RestoreOutcome::Restored {
                        step: session.current_step(),
                    }
                } else {
                    tracing::warn!("stored step missing or out of range, starting at step 1");
                    RestoreOutcome::StepOutOfRange
                }
            }
            Err(SessionStoreError::Corrupt(reason)) => {
                tracing::warn!(%reason, "stored session is corrupt, starting over");
                self.session.lock().await.reset();
                RestoreOutcome::Unreadable
            }
            Err(error) => {
                tracing::warn!(error = %error, "session storage unreadable, continuing in memory");
                self.session.lock().await.reset();
                self.persistence_enabled.store(false, Ordering::SeqCst);
                self.notify(Notification::warning(
                    "Armazenamento indisponível; o progresso fica apenas nesta sessão",
                ));
                RestoreOutcome::Unreadable
            }
        };
        tracing::info!(?outcome, "session restored");
        self.emit_progress().await;
        outcome
    }

    /// Validates the current step and moves to the next one, running its
    /// action.
    pub async fn advance(&self, form: &FormFields) -> AdvanceOutcome {
        let Some(_guard) = self.processing.try_acquire() else {
            self.notify(Notification::info("Aguarde o processamento atual..."));
            return AdvanceOutcome::Busy;
        };

        let (from, next) = {
            let mut session = self.session.lock().await;
            let from = session.current_step();
            if let Err(error) = self.rules.validate(from, &session, form) {
                drop(session);
                tracing::info!(step = from, error = %error, "step validation failed");
                self.notify(Notification::error(error.to_string()));
                if let Some(field) = error.field() {
                    self.presenter.emit(UiEvent::FocusField {
                        field: field.to_string(),
                    });
                }
                return AdvanceOutcome::Blocked(error);
            }
            session.record_step_data(form);
            (from, session.advance())
        };

        let Some(to) = next else {
            tracing::info!(step = from, "wizard completed");
            self.notify(Notification::success("Projeto concluído!"));
            self.persist().await;
            return AdvanceOutcome::Completed;
        };

        tracing::info!(from, to, "advanced to next step");
        self.emit_progress().await;
        let action = self.dispatcher.run(to, &self.session).await;
        self.persist().await;

        AdvanceOutcome::Advanced { from, to, action }
    }

    /// Moves one step back. Step 1 stays put.
    pub async fn retreat(&self) -> RetreatOutcome {
        let moved = {
            let mut session = self.session.lock().await;
            let from = session.current_step();
            session.retreat().map(|to| (from, to))
        };

        match moved {
            Some((from, to)) => {
                tracing::info!(from, to, "went back one step");
                self.emit_progress().await;
                self.persist().await;
                RetreatOutcome::Retreated { from, to }
            }
            None => RetreatOutcome::AtFirstStep,
        }
    }

    /// Persists on demand. Returns whether the snapshot was written.
    pub async fn save_session(&self) -> bool {
        if !self.persistence_enabled.load(Ordering::SeqCst) {
            self.notify(Notification::warning(
                "Armazenamento indisponível; o progresso fica apenas nesta sessão",
            ));
            return false;
        }
        let saved = self.persist().await;
        if saved {
            self.notify(Notification::success("Sessão salva!"));
        }
        saved
    }

    /// Discards the stored and in-memory session and returns to step 1.
    pub async fn start_new_project(&self) {
        if let Err(error) = self.store.clear().await {
            tracing::warn!(error = %error, "could not clear stored session");
        }
        self.session.lock().await.reset();
        self.catalog.reset().await;
        tracing::info!("started a new project");
        self.notify(Notification::info("Novo projeto iniciado"));
        self.emit_progress().await;
    }

    /// Appends a user message and, after the reply delay, the consultant's
    /// answer. Blank input is ignored.
    pub async fn send_chat_message(&self, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let message = ChatMessage::user(text);
        self.session.lock().await.chat_history.push(message.clone());
        self.presenter.emit(UiEvent::ChatMessage(message));

        if !self.chat_reply_delay.is_zero() {
            tokio::time::sleep(self.chat_reply_delay).await;
        }

        let reply = ChatMessage::reply_to(text);
        self.session.lock().await.chat_history.push(reply.clone());
        self.presenter.emit(UiEvent::ChatMessage(reply.clone()));
        self.persist().await;
        Some(reply)
    }

    /// Shows the detail panel of a reference project.
    pub async fn open_project_detail(&self, id: &str) -> DetailOutcome {
        let id = ProjectId::new(id.trim());
        self.panel(PanelState::Running {
            message: "Carregando detalhes do projeto...".into(),
        });

        match self.catalog.lookup_by_id(&id).await {
            Ok(Some(project)) => {
                self.presenter.emit(UiEvent::ProjectDetail {
                    project: Box::new(project.clone()),
                });
                self.panel(PanelState::Completed {
                    message: project.name.clone(),
                });
                DetailOutcome::Shown(project)
            }
            Ok(None) => {
                self.panel(PanelState::NotFound {
                    id: id.to_string(),
                });
                DetailOutcome::NotFound
            }
            Err(error) => {
                tracing::error!(id = %id, error = %error, "project lookup failed");
                self.panel(PanelState::Failed {
                    message: "Erro ao carregar detalhes do projeto".into(),
                });
                self.notify(Notification::error("Erro ao carregar detalhes do projeto"));
                DetailOutcome::Failed
            }
        }
    }

    /// Emits summary figures over a fresh SALIC sample.
    pub async fn show_statistics(&self) {
        let statistics = self.catalog.statistics().await;
        self.presenter.emit(UiEvent::Statistics { statistics });
    }

    /// The step 1 form as the user last confirmed it.
    pub async fn form_from_session(&self) -> FormFields {
        FormFields::from_project_data(&self.session.lock().await.project_data)
    }

    pub async fn progress(&self) -> StepProgress {
        self.session.lock().await.progress()
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_set()
    }

    /// False once a write failed; the session then lives in memory only.
    pub fn is_persisting(&self) -> bool {
        self.persistence_enabled.load(Ordering::SeqCst)
    }

    /// Copy of the current session.
    pub async fn session(&self) -> WizardSession {
        self.session.lock().await.clone()
    }

    async fn persist(&self) -> bool {
        if !self.persistence_enabled.load(Ordering::SeqCst) {
            return false;
        }
        let snapshot = SessionSnapshot::capture(&*self.session.lock().await);
        match self.store.save(&snapshot).await {
            Ok(()) => {
                tracing::debug!(step = snapshot.current_step, "session persisted");
                true
            }
            Err(error) => {
                tracing::warn!(error = %error, "session persistence failed, continuing in memory");
                self.persistence_enabled.store(false, Ordering::SeqCst);
                self.notify(Notification::warning(
                    "Não foi possível salvar o progresso; continuando sem salvar",
                ));
                false
            }
        }
    }

    async fn emit_progress(&self) {
        let progress = self.session.lock().await.progress();
        self.presenter.emit(UiEvent::Progress(progress));
    }

    fn panel(&self, panel: PanelState) {
        self.presenter
            .emit(UiEvent::panel(PanelTarget::ProjectDetail, panel));
    }

    fn notify(&self, notification: Notification) {
        self.presenter.emit(UiEvent::Notification(notification));
    }
}
