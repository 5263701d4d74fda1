//! StepActionDispatcher - runs the side effect of the step just entered.
//!
//! The session mutex is only held to read inputs and to store results,
//! never while a relay or dataset call is pending.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;

use crate::domain::salic::SalicStatistics;
use crate::domain::wizard::{ChatMessage, Diagnostic, Notification, WizardSession, WizardStep, CHAT_GREETING};
use crate::ports::{PanelState, PanelTarget, Presenter, ReferenceCatalog, SuggestionRelay, UiEvent};

/// What entering a step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Suggestion stored; `fallback` when the relay reported an upstream error.
    AnalysisStored { fallback: bool },
    AnalysisFailed,
    SimilarFound { count: usize },
    SimilarUnavailable,
    SimilarTimedOut,
    DiagnosticStored { viability: u8 },
    ChatSeeded,
    ChatResumed,
    InDevelopment { step: u32 },
    /// Steps outside the named flow have no action.
    NoAction,
}

/// Runs the action attached to each wizard step.
pub struct StepActionDispatcher {
    relay: Arc<dyn SuggestionRelay>,
    catalog: Arc<dyn ReferenceCatalog>,
    presenter: Arc<dyn Presenter>,
    search_timeout: Duration,
    rng: Mutex<StdRng>,
}

impl StepActionDispatcher {
    pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(
        relay: Arc<dyn SuggestionRelay>,
        catalog: Arc<dyn ReferenceCatalog>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            relay,
            catalog,
            presenter,
            search_timeout: Self::DEFAULT_SEARCH_TIMEOUT,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    /// Makes the diagnostic score reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Runs the action of `step`.
    pub async fn run(&self, step: u32, session: &AsyncMutex<WizardSession>) -> ActionOutcome {
        let outcome = match WizardStep::from_number(step) {
            Some(WizardStep::AiAnalysis) => self.analyze(session).await,
            Some(WizardStep::SalicSearch) => self.search_similar(session).await,
            Some(WizardStep::Diagnostic) => self.diagnose(session).await,
            Some(WizardStep::ConsultiveChat) => self.open_chat(session).await,
            Some(_) if step > 1 => {
                self.notify(Notification::info(format!("Etapa {} em desenvolvimento", step)));
                ActionOutcome::InDevelopment { step }
            }
            _ => ActionOutcome::NoAction,
        };
        tracing::debug!(step, ?outcome, "step action finished");
        outcome
    }

    async fn analyze(&self, session: &AsyncMutex<WizardSession>) -> ActionOutcome {
        let prompt = session.lock().await.project_data.analysis_prompt();
        self.panel(
            PanelTarget::Analysis,
            PanelState::Running {
                message: "Analisando proposta com IA...".into(),
            },
        );

        match self.relay.suggest(&prompt).await {
            Ok(answer) => {
                let fallback = answer.is_soft_failure();
                if fallback {
                    tracing::warn!(
                        error = answer.error.as_deref().unwrap_or_default(),
                        "relay used a fallback suggestion"
                    );
                    self.notify(Notification::warning(
                        "IA indisponível no momento; exibindo sugestão simulada",
                    ));
                }
                session.lock().await.analysis_results.ai_analysis =
                    Some(answer.suggestion.clone());
                self.presenter.emit(UiEvent::AnalysisResult {
                    text: answer.suggestion,
                });
                self.panel(
                    PanelTarget::Analysis,
                    PanelState::Completed {
                        message: format!("Fonte: {}", answer.source),
                    },
                );
                self.notify(Notification::success("Análise IA concluída!"));
                ActionOutcome::AnalysisStored { fallback }
            }
            Err(error) => {
                tracing::error!(error = %error, "AI analysis failed");
                self.panel(
                    PanelTarget::Analysis,
                    PanelState::Failed {
                        message: "Não foi possível obter a análise".into(),
                    },
                );
                self.notify(Notification::error(format!("Erro na análise IA: {}", error)));
                ActionOutcome::AnalysisFailed
            }
        }
    }

    async fn search_similar(&self, session: &AsyncMutex<WizardSession>) -> ActionOutcome {
        self.panel(
            PanelTarget::SimilarProjects,
            PanelState::Running {
                message: "Buscando projetos similares no SALIC...".into(),
            },
        );

        match tokio::time::timeout(self.search_timeout, self.catalog.search_diversified()).await {
            Ok(projects) if !projects.is_empty() => {
                let count = projects.len();
                session.lock().await.similar_projects = projects.clone();
                self.presenter.emit(UiEvent::Statistics {
                    statistics: SalicStatistics::from_sample(&projects),
                });
                self.presenter.emit(UiEvent::SimilarProjects { projects });
                self.panel(
                    PanelTarget::SimilarProjects,
                    PanelState::Completed {
                        message: format!("{} projetos encontrados", count),
                    },
                );
                self.notify(Notification::success(format!(
                    "{} projetos similares encontrados!",
                    count
                )));
                ActionOutcome::SimilarFound { count }
            }
            Ok(_) => {
                self.panel(
                    PanelTarget::SimilarProjects,
                    PanelState::Unavailable {
                        message: "SALIC Temporariamente Indisponível. Continuando sem projetos de referência.".into(),
                    },
                );
                self.notify(Notification::warning(
                    "Nenhum projeto de referência disponível no SALIC",
                ));
                ActionOutcome::SimilarUnavailable
            }
            Err(_) => {
                tracing::warn!(timeout_secs = self.search_timeout.as_secs(), "SALIC search timed out");
                self.panel(
                    PanelTarget::SimilarProjects,
                    PanelState::Failed {
                        message: "SALIC Indisponível".into(),
                    },
                );
                self.notify(Notification::warning(
                    "Busca no SALIC demorou demais; continuando sem projetos de referência",
                ));
                ActionOutcome::SimilarTimedOut
            }
        }
    }

    async fn diagnose(&self, session: &AsyncMutex<WizardSession>) -> ActionOutcome {
        let viability = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(7..=9)
        };
        session.lock().await.analysis_results.diagnostic = Some(Diagnostic::with_viability(viability));
        self.notify(Notification::success("Diagnóstico estratégico concluído!"));
        ActionOutcome::DiagnosticStored { viability }
    }

    async fn open_chat(&self, session: &AsyncMutex<WizardSession>) -> ActionOutcome {
        let mut session = session.lock().await;
        if !session.chat_history.is_empty() {
            return ActionOutcome::ChatResumed;
        }
        let greeting = ChatMessage::assistant(CHAT_GREETING);
        session.chat_history.push(greeting.clone());
        drop(session);

        self.presenter.emit(UiEvent::ChatMessage(greeting));
        ActionOutcome::ChatSeeded
    }

    fn panel(&self, target: PanelTarget, panel: PanelState) {
        self.presenter.emit(UiEvent::panel(target, panel));
    }

    fn notify(&self, notification: Notification) {
        self.presenter.emit(UiEvent::Notification(notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::presenter::RecordingPresenter;
    use crate::adapters::relay::MockSuggestionRelay;
    use crate::adapters::salic::{MockProxyRelay, SalicClient};
    use crate::domain::salic::SearchPolicy;
    use crate::domain::wizard::NotificationLevel;
    use crate::ports::{ProxyRelay, RelayError, RelaySuggestion};
    use serde_json::json;

    struct Fixture {
        dispatcher: StepActionDispatcher,
        relay: MockSuggestionRelay,
        presenter: RecordingPresenter,
        session: AsyncMutex<WizardSession>,
    }

    fn fixture(relay: MockSuggestionRelay, proxy: MockProxyRelay) -> Fixture {
        let presenter = RecordingPresenter::new();
        let proxies: Vec<Arc<dyn ProxyRelay>> = vec![Arc::new(proxy)];
        let catalog = SalicClient::new(SalicClient::DEFAULT_BASE_URL, proxies)
            .with_policy(SearchPolicy::ordered());
        let dispatcher = StepActionDispatcher::new(
            Arc::new(relay.clone()),
            Arc::new(catalog),
            Arc::new(presenter.clone()),
        )
        .with_seed(7);
        Fixture {
            dispatcher,
            relay,
            presenter,
            session: AsyncMutex::new(WizardSession::new(9)),
        }
    }

    fn offline() -> MockProxyRelay {
        MockProxyRelay::new("offline")
    }

    #[tokio::test]
    async fn analysis_stores_suggestion() {
        let f = fixture(MockSuggestionRelay::new().with_suggestion("Bom potencial"), offline());
        f.session.lock().await.project_data.idea = "Oficinas de teatro".into();

        let outcome = f.dispatcher.run(2, &f.session).await;

        assert_eq!(outcome, ActionOutcome::AnalysisStored { fallback: false });
        assert_eq!(
            f.session.lock().await.analysis_results.ai_analysis.as_deref(),
            Some("Bom potencial")
        );
        assert_eq!(f.relay.calls(), vec!["Ideia do projeto: Oficinas de teatro"]);
        assert!(f.presenter.messages().contains(&"Análise IA concluída!".to_string()));
    }

    #[tokio::test]
    async fn analysis_soft_failure_still_stores_and_warns() {
        let answer = RelaySuggestion::new("Sugestão simulada", "Fallback").with_error("timeout");
        let f = fixture(MockSuggestionRelay::new().with_answer(answer), offline());

        let outcome = f.dispatcher.run(2, &f.session).await;

        assert_eq!(outcome, ActionOutcome::AnalysisStored { fallback: true });
        assert!(f.session.lock().await.analysis_results.has_ai_analysis());
        assert!(f
            .presenter
            .notifications()
            .iter()
            .any(|n| n.level == NotificationLevel::Warning));
    }

    #[tokio::test]
    async fn analysis_hard_failure_stores_nothing() {
        let f = fixture(
            MockSuggestionRelay::new().with_error(RelayError::Status { status: 502 }),
            offline(),
        );

        let outcome = f.dispatcher.run(2, &f.session).await;

        assert_eq!(outcome, ActionOutcome::AnalysisFailed);
        assert!(!f.session.lock().await.analysis_results.has_ai_analysis());
        let last = f.presenter.notifications().pop().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
        assert!(last.message.starts_with("Erro na análise IA:"));
        assert!(f.presenter.events().contains(&UiEvent::panel(
            PanelTarget::Analysis,
            PanelState::Failed {
                message: "Não foi possível obter a análise".into()
            }
        )));
    }

    #[tokio::test]
    async fn search_stores_projects() {
        let proxy = MockProxyRelay::new("p").with_payload(json!([
            {"PRONAC": "1", "nome": "A"},
            {"PRONAC": "2", "nome": "B"}
        ]));
        let f = fixture(MockSuggestionRelay::new(), proxy);

        let outcome = f.dispatcher.run(3, &f.session).await;

        assert_eq!(outcome, ActionOutcome::SimilarFound { count: 2 });
        assert_eq!(f.session.lock().await.similar_projects.len(), 2);
        assert!(f
            .presenter
            .messages()
            .contains(&"2 projetos similares encontrados!".to_string()));
    }

    #[tokio::test]
    async fn empty_search_continues_without_references() {
        let f = fixture(MockSuggestionRelay::new(), offline());

        let outcome = f.dispatcher.run(3, &f.session).await;

        assert_eq!(outcome, ActionOutcome::SimilarUnavailable);
        assert!(f.session.lock().await.similar_projects.is_empty());
        assert_eq!(
            f.presenter.notifications(),
            vec![Notification::warning(
                "Nenhum projeto de referência disponível no SALIC"
            )]
        );
    }

    #[tokio::test]
    async fn slow_search_times_out() {
        let proxy = MockProxyRelay::new("slow")
            .with_delay(Duration::from_millis(200))
            .with_fallback_payload(json!([{"PRONAC": "1"}]));
        let mut f = fixture(MockSuggestionRelay::new(), proxy);
        f.dispatcher = f.dispatcher.with_search_timeout(Duration::from_millis(20));

        let outcome = f.dispatcher.run(3, &f.session).await;

        assert_eq!(outcome, ActionOutcome::SimilarTimedOut);
        assert!(f.session.lock().await.similar_projects.is_empty());
        let notifications = f.presenter.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Warning);
        assert!(notifications[0].message.starts_with("Busca no SALIC demorou demais"));
        assert!(f.presenter.events().contains(&UiEvent::panel(
            PanelTarget::SimilarProjects,
            PanelState::Failed {
                message: "SALIC Indisponível".into()
            }
        )));
    }

    #[tokio::test]
    async fn diagnostic_viability_in_range() {
        let f = fixture(MockSuggestionRelay::new(), offline());
        for _ in 0..20 {
            match f.dispatcher.run(4, &f.session).await {
                ActionOutcome::DiagnosticStored { viability } => {
                    assert!((7..=9).contains(&viability))
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        assert!(f.session.lock().await.analysis_results.has_diagnostic());
    }

    #[tokio::test]
    async fn chat_greeting_only_once() {
        let f = fixture(MockSuggestionRelay::new(), offline());

        assert_eq!(f.dispatcher.run(5, &f.session).await, ActionOutcome::ChatSeeded);
        assert_eq!(f.dispatcher.run(5, &f.session).await, ActionOutcome::ChatResumed);

        let session = f.session.lock().await;
        assert_eq!(session.chat_history.len(), 1);
        assert_eq!(session.chat_history[0].content, CHAT_GREETING);
    }

    #[tokio::test]
    async fn later_steps_are_in_development() {
        let f = fixture(MockSuggestionRelay::new(), offline());
        assert_eq!(
            f.dispatcher.run(7, &f.session).await,
            ActionOutcome::InDevelopment { step: 7 }
        );
        assert_eq!(f.presenter.messages(), vec!["Etapa 7 em desenvolvimento"]);
    }

    #[tokio::test]
    async fn steps_outside_the_flow_do_nothing() {
        let f = fixture(MockSuggestionRelay::new(), offline());
        assert_eq!(f.dispatcher.run(1, &f.session).await, ActionOutcome::NoAction);
        assert_eq!(f.dispatcher.run(12, &f.session).await, ActionOutcome::NoAction);
        assert!(f.presenter.events().is_empty());
        assert_eq!(f.relay.call_count(), 0);
    }
}
