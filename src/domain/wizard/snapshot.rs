//! Persisted form of the wizard session.
//!
//! Writing is strict: the whole session is serialized. Reading is lenient:
//! every top-level field is optional and a field with an unexpected shape is
//! treated as absent instead of failing the whole load.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::Timestamp;
use crate::domain::salic::ReferenceProject;

use super::analysis::AnalysisResults;
use super::chat::ChatMessage;
use super::project_data::ProjectData;
use super::session::WizardSession;

/// Snapshot written after every transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_step: u32,
    pub total_steps: u32,
    pub project_data: ProjectData,
    pub analysis_results: AnalysisResults,
    pub salic_similar: Vec<ReferenceProject>,
    pub chat_history: Vec<ChatMessage>,
    pub timestamp: Timestamp,
}

impl SessionSnapshot {
    pub fn capture(session: &WizardSession) -> Self {
        Self {
            current_step: session.current_step(),
            total_steps: session.total_steps(),
            project_data: session.project_data.clone(),
            analysis_results: session.analysis_results.clone(),
            salic_similar: session.similar_projects.clone(),
            chat_history: session.chat_history.clone(),
            timestamp: Timestamp::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Snapshot as read back from storage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    #[serde(default, deserialize_with = "lenient")]
    pub current_step: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub project_data: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub analysis_results: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub salic_similar: Option<Vec<ReferenceProject>>,
    #[serde(default, deserialize_with = "lenient")]
    pub chat_history: Option<Vec<ChatMessage>>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<Timestamp>,
}

/// What a restore changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreReport {
    /// False when the stored step was missing or out of range.
    pub step_restored: bool,
}

impl StoredSession {
    /// Parses stored JSON. Only malformed JSON (or a non-object) fails.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Applies the stored values onto a session.
    ///
    /// Project data and analysis results merge key by key; chat history and
    /// similar projects replace the session's lists when present.
    pub fn apply_to(self, session: &mut WizardSession) -> RestoreReport {
        let step_restored = session.restore_step(self.current_step);

        if let Some(project_data) = &self.project_data {
            session.project_data.merge_from(project_data);
        }
        if let Some(analysis) = &self.analysis_results {
            session.analysis_results.merge_from(analysis);
        }
        if let Some(chat_history) = self.chat_history {
            session.chat_history = chat_history;
        }
        if let Some(similar) = self.salic_similar {
            session.similar_projects = similar;
        }

        RestoreReport { step_restored }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::Diagnostic;

    fn populated_session() -> WizardSession {
        let mut session = WizardSession::new(9);
        session.advance();
        session.advance();
        session.project_data.idea = "Mostra de dança contemporânea".into();
        session.project_data.budget = Some(95000.0);
        session.analysis_results.ai_analysis = Some("Boa proposta".into());
        session.analysis_results.diagnostic = Some(Diagnostic::with_viability(8));
        session.chat_history.push(ChatMessage::assistant("oi"));
        session
    }

    #[test]
    fn round_trip_restores_session() {
        let original = populated_session();
        let json = SessionSnapshot::capture(&original).to_json().unwrap();

        let mut restored = WizardSession::new(9);
        let report = StoredSession::parse(&json).unwrap().apply_to(&mut restored);

        assert!(report.step_restored);
        assert_eq!(restored.current_step(), 3);
        assert_eq!(restored.project_data, original.project_data);
        assert_eq!(restored.analysis_results, original.analysis_results);
        assert_eq!(restored.chat_history, original.chat_history);
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let json = SessionSnapshot::capture(&populated_session()).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        for key in [
            "currentStep",
            "totalSteps",
            "projectData",
            "analysisResults",
            "salicSimilar",
            "chatHistory",
            "timestamp",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn out_of_range_step_resets_to_one() {
        for raw in [r#"{"currentStep":0}"#, r#"{"currentStep":14}"#, r#"{"currentStep":-3}"#] {
            let mut session = WizardSession::new(9);
            session.advance();
            let report = StoredSession::parse(raw).unwrap().apply_to(&mut session);
            assert!(!report.step_restored);
            assert_eq!(session.current_step(), 1);
        }
    }

    #[test]
    fn wrong_typed_fields_are_ignored() {
        let raw = r#"{
            "currentStep": "three",
            "projectData": {"idea": "Sarau literário"},
            "chatHistory": "not a list"
        }"#;
        let mut session = WizardSession::new(9);
        StoredSession::parse(raw).unwrap().apply_to(&mut session);

        assert_eq!(session.current_step(), 1);
        assert_eq!(session.project_data.idea, "Sarau literário");
        assert!(session.chat_history.is_empty());
    }

    #[test]
    fn project_data_merges_instead_of_replacing() {
        let mut session = WizardSession::new(9);
        session.project_data.location = "Manaus/AM".into();
        StoredSession::parse(r#"{"currentStep":2,"projectData":{"idea":"x"}}"#)
            .unwrap()
            .apply_to(&mut session);
        assert_eq!(session.project_data.idea, "x");
        assert_eq!(session.project_data.location, "Manaus/AM");
    }

    #[test]
    fn malformed_json_fails_to_parse() {
        assert!(StoredSession::parse("{not json").is_err());
        assert!(StoredSession::parse("42").is_err());
    }
}
