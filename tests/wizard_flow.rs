//! Integration tests for the wizard flow.
//!
//! Drives the navigator end to end through mock relays, the in-memory and
//! file session stores and a recording presenter.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use ona_wizard::adapters::presenter::RecordingPresenter;
use ona_wizard::adapters::relay::MockSuggestionRelay;
use ona_wizard::adapters::salic::{MockProxyRelay, SalicClient};
use ona_wizard::adapters::storage::{FileSessionStore, InMemorySessionStore};
use ona_wizard::application::{
    ActionOutcome, AdvanceOutcome, DetailOutcome, RestoreOutcome, WizardNavigator,
};
use ona_wizard::domain::foundation::ValidationError;
use ona_wizard::domain::salic::SearchPolicy;
use ona_wizard::domain::wizard::{FormFields, FIELD_BUDGET, FIELD_IDEA, FIELD_LOCATION};
use ona_wizard::ports::{ProxyRelay, SessionStore, UiEvent};

// =============================================================================
// Test Infrastructure
// =============================================================================

const IDEA: &str = "Circuito de cinema itinerante com oficinas de audiovisual para jovens da periferia";

fn salic_page() -> Value {
    json!({
        "_embedded": {
            "projetos": [
                {"PRONAC": "201010", "nome": "Cine Periferia", "UfProjeto": "SP", "valor_aprovado": "R$ 250.000,00"},
                {"PRONAC": "201011", "nome": "Oficina Olhar", "UfProjeto": "BA", "situacao": "Aprovado"},
                {"PRONAC": "201012", "nome": "Tela Aberta", "UfProjeto": "PE"}
            ]
        }
    })
}

struct Harness {
    navigator: Arc<WizardNavigator>,
    relay: MockSuggestionRelay,
    proxy: MockProxyRelay,
    presenter: RecordingPresenter,
}

fn harness(store: Arc<dyn SessionStore>, relay: MockSuggestionRelay, proxy: MockProxyRelay) -> Harness {
    let presenter = RecordingPresenter::new();
    let proxies: Vec<Arc<dyn ProxyRelay>> = vec![Arc::new(proxy.clone())];
    let catalog = SalicClient::new(SalicClient::DEFAULT_BASE_URL, proxies)
        .with_policy(SearchPolicy::ordered());
    let navigator = WizardNavigator::new(
        9,
        store,
        Arc::new(catalog),
        Arc::new(relay.clone()),
        Arc::new(presenter.clone()),
    )
    .with_chat_reply_delay(Duration::ZERO)
    .with_seed(42);

    Harness {
        navigator: Arc::new(navigator),
        relay,
        proxy,
        presenter,
    }
}

fn default_harness() -> Harness {
    harness(
        Arc::new(InMemorySessionStore::new()),
        MockSuggestionRelay::new().with_suggestion("Destaque a formação de público"),
        MockProxyRelay::new("salic").with_fallback_payload(salic_page()),
    )
}

fn step_one_form() -> FormFields {
    FormFields::new()
        .with(FIELD_IDEA, IDEA)
        .with(FIELD_BUDGET, "R$ 150.000,00")
        .with(FIELD_LOCATION, "Recife/PE")
}

// =============================================================================
// Full Flow
// =============================================================================

#[tokio::test]
async fn walks_through_every_step() {
    let h = default_harness();
    let empty = FormFields::new();

    // 1 -> 2: AI analysis
    match h.navigator.advance(&step_one_form()).await {
        AdvanceOutcome::Advanced { from: 1, to: 2, action } => {
            assert_eq!(action, ActionOutcome::AnalysisStored { fallback: false })
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(h.relay.calls()[0].contains("Orçamento estimado: R$ 150.000"));

    // 2 -> 3: SALIC search
    match h.navigator.advance(&empty).await {
        AdvanceOutcome::Advanced { to: 3, action, .. } => {
            assert_eq!(action, ActionOutcome::SimilarFound { count: 3 })
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    // 3 -> 4: diagnostic
    match h.navigator.advance(&empty).await {
        AdvanceOutcome::Advanced { to: 4, action, .. } => {
            assert!(matches!(action, ActionOutcome::DiagnosticStored { viability: 7..=9 }))
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    // 4 -> 5: chat opens with a greeting
    assert!(matches!(
        h.navigator.advance(&empty).await,
        AdvanceOutcome::Advanced { to: 5, action: ActionOutcome::ChatSeeded, .. }
    ));

    // chat needs a real exchange before moving on
    assert!(matches!(
        h.navigator.advance(&empty).await,
        AdvanceOutcome::Blocked(ValidationError::PredicateFailed { step: 5, .. })
    ));
    h.navigator.send_chat_message("Qual a melhor contrapartida?").await;

    for expected in 6..=9 {
        match h.navigator.advance(&empty).await {
            AdvanceOutcome::Advanced { to, action, .. } => {
                assert_eq!(to, expected);
                assert_eq!(action, ActionOutcome::InDevelopment { step: expected });
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    assert_eq!(h.navigator.advance(&empty).await, AdvanceOutcome::Completed);

    let progress = h.navigator.progress().await;
    assert_eq!(progress.current, 9);
    assert!(progress.is_last_step);
    assert_eq!(progress.percent.value(), 100);
    assert!(h.presenter.messages().contains(&"Projeto concluído!".to_string()));
}

#[tokio::test]
async fn step_two_blocks_without_analysis() {
    let h = harness(
        Arc::new(InMemorySessionStore::new()),
        MockSuggestionRelay::new().with_error(ona_wizard::ports::RelayError::Status { status: 500 }),
        MockProxyRelay::new("salic"),
    );

    assert!(matches!(
        h.navigator.advance(&step_one_form()).await,
        AdvanceOutcome::Advanced { to: 2, action: ActionOutcome::AnalysisFailed, .. }
    ));
    assert!(matches!(
        h.navigator.advance(&FormFields::new()).await,
        AdvanceOutcome::Blocked(ValidationError::PredicateFailed { step: 2, .. })
    ));
    assert_eq!(h.navigator.progress().await.current, 2);
}

// =============================================================================
// Re-entrancy
// =============================================================================

#[tokio::test]
async fn second_advance_during_action_is_dropped() {
    let h = harness(
        Arc::new(InMemorySessionStore::new()),
        MockSuggestionRelay::new()
            .with_suggestion("ok")
            .with_delay(Duration::from_millis(100)),
        MockProxyRelay::new("salic"),
    );

    let navigator = h.navigator.clone();
    let first = tokio::spawn(async move { navigator.advance(&step_one_form()).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(h.navigator.is_processing());
    assert_eq!(h.navigator.advance(&step_one_form()).await, AdvanceOutcome::Busy);

    let outcome = first.await.unwrap();
    assert!(matches!(outcome, AdvanceOutcome::Advanced { from: 1, to: 2, .. }));
    assert_eq!(h.navigator.progress().await.current, 2);
    assert_eq!(h.relay.call_count(), 1);
    assert!(!h.navigator.is_processing());
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn session_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let h = harness(
            Arc::new(FileSessionStore::new(dir.path(), "ona-progress")),
            MockSuggestionRelay::new(),
            MockProxyRelay::new("salic").with_fallback_payload(salic_page()),
        );
        h.navigator.advance(&step_one_form()).await;
        h.navigator.advance(&FormFields::new()).await;
        h.navigator.send_chat_message("Posso incluir oficinas online?").await;
    }

    let h = harness(
        Arc::new(FileSessionStore::new(dir.path(), "ona-progress")),
        MockSuggestionRelay::new(),
        MockProxyRelay::new("offline"),
    );

    assert_eq!(h.navigator.restore().await, RestoreOutcome::Restored { step: 3 });
    let session = h.navigator.session().await;
    assert_eq!(session.project_data.idea, IDEA);
    assert_eq!(session.project_data.budget, Some(150000.0));
    assert_eq!(session.project_data.location, "Recife/PE");
    assert_eq!(session.chat_history.len(), 2);
    assert_eq!(session.similar_projects.len(), 3);
    assert!(session.analysis_results.has_ai_analysis());

    let form = h.navigator.form_from_session().await;
    assert_eq!(form.get(FIELD_IDEA), IDEA);
}

#[tokio::test]
async fn out_of_range_steps_restore_to_one() {
    for raw in [r#"{"currentStep":0}"#, r#"{"currentStep":14}"#, r#"{"currentStep":"3"}"#] {
        let h = harness(
            Arc::new(InMemorySessionStore::with_raw(raw)),
            MockSuggestionRelay::new(),
            MockProxyRelay::new("offline"),
        );
        assert_eq!(h.navigator.restore().await, RestoreOutcome::StepOutOfRange, "{}", raw);
        assert_eq!(h.navigator.progress().await.current, 1);
    }
}

#[tokio::test]
async fn corrupt_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ona-progress.json"), "{\"currentStep\": 4,").unwrap();

    let h = harness(
        Arc::new(FileSessionStore::new(dir.path(), "ona-progress")),
        MockSuggestionRelay::new(),
        MockProxyRelay::new("offline"),
    );

    assert_eq!(h.navigator.restore().await, RestoreOutcome::Unreadable);
    assert_eq!(h.navigator.progress().await.current, 1);
}

#[tokio::test]
async fn start_new_project_removes_stored_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path(), "ona-progress");
    let path = store.file_path();
    let h = harness(Arc::new(store), MockSuggestionRelay::new(), MockProxyRelay::new("offline"));

    h.navigator.advance(&step_one_form()).await;
    assert!(path.exists());

    h.navigator.start_new_project().await;
    assert!(!path.exists());
    assert_eq!(h.navigator.progress().await.current, 1);
}

// =============================================================================
// Reference Projects
// =============================================================================

#[tokio::test]
async fn displayed_project_opens_without_network() {
    let h = harness(
        Arc::new(InMemorySessionStore::new()),
        MockSuggestionRelay::new(),
        MockProxyRelay::new("salic").with_payload(salic_page()),
    );
    h.navigator.advance(&step_one_form()).await;
    h.navigator.advance(&FormFields::new()).await;
    let calls = h.proxy.call_count();

    match h.navigator.open_project_detail("201011").await {
        DetailOutcome::Shown(project) => {
            assert_eq!(project.name, "Oficina Olhar");
            assert!(project.is_approved());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(h.proxy.call_count(), calls);
    assert!(h
        .presenter
        .events()
        .iter()
        .any(|e| matches!(e, UiEvent::ProjectDetail { .. })));
}

#[tokio::test]
async fn unknown_project_is_reported_as_not_found() {
    let h = harness(
        Arc::new(InMemorySessionStore::new()),
        MockSuggestionRelay::new(),
        MockProxyRelay::new("salic").with_fallback_payload(salic_page()),
    );

    assert_eq!(
        h.navigator.open_project_detail("999999").await,
        DetailOutcome::NotFound
    );
}
