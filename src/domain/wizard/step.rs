//! WizardStep enum representing the nine stages of a grant application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stages of the application wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    InitialInput,
    AiAnalysis,
    SalicSearch,
    Diagnostic,
    ConsultiveChat,
    Generation,
    Editing,
    Export,
    Finalization,
}

impl WizardStep {
    /// Returns all steps in canonical order.
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::InitialInput,
            WizardStep::AiAnalysis,
            WizardStep::SalicSearch,
            WizardStep::Diagnostic,
            WizardStep::ConsultiveChat,
            WizardStep::Generation,
            WizardStep::Editing,
            WizardStep::Export,
            WizardStep::Finalization,
        ]
    }

    /// Looks up a step by its 1-based number.
    pub fn from_number(number: u32) -> Option<WizardStep> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::all().get(index).copied()
    }

    /// Returns the 1-based number of this step.
    pub fn number(&self) -> u32 {
        match self {
            WizardStep::InitialInput => 1,
            WizardStep::AiAnalysis => 2,
            WizardStep::SalicSearch => 3,
            WizardStep::Diagnostic => 4,
            WizardStep::ConsultiveChat => 5,
            WizardStep::Generation => 6,
            WizardStep::Editing => 7,
            WizardStep::Export => 8,
            WizardStep::Finalization => 9,
        }
    }

    /// Returns the next step in order, if any.
    pub fn next(&self) -> Option<WizardStep> {
        Self::from_number(self.number() + 1)
    }

    /// Returns the previous step in order, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        Self::from_number(self.number() - 1)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::InitialInput => "Input Inicial",
            WizardStep::AiAnalysis => "Análise IA",
            WizardStep::SalicSearch => "Busca SALIC",
            WizardStep::Diagnostic => "Diagnóstico",
            WizardStep::ConsultiveChat => "Chat Consultivo",
            WizardStep::Generation => "Geração",
            WizardStep::Editing => "Edição",
            WizardStep::Export => "Exportação",
            WizardStep::Finalization => "Finalização",
        }
    }

    /// Label of the "next" button while this step is current.
    pub fn next_label(&self) -> &'static str {
        match self {
            WizardStep::InitialInput => "Analisar com IA",
            WizardStep::AiAnalysis => "Buscar Similares",
            WizardStep::SalicSearch => "Gerar Diagnóstico",
            WizardStep::Diagnostic => "Iniciar Chat",
            WizardStep::ConsultiveChat => "Gerar Projeto",
            WizardStep::Generation => "Editar Seções",
            WizardStep::Editing => "Exportar Documentos",
            WizardStep::Export => "Finalizar",
            WizardStep::Finalization => "Concluído",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
