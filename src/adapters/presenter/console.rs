//! Presenter writing plain-text lines to a terminal.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::salic::ReferenceProject;
use crate::domain::wizard::{ChatRole, NotificationLevel};
use crate::ports::{PanelState, PanelTarget, Presenter, UiEvent};

/// Renders events as text on any writer (stdout by default).
pub struct ConsolePresenter<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn emit(&self, event: UiEvent) {
        tracing::trace!(?event, "presenting event");
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        for line in render(&event) {
            if let Err(e) = writeln!(out, "{}", line) {
                tracing::warn!(error = %e, "failed to write to console");
                return;
            }
        }
        let _ = out.flush();
    }
}

/// Text lines for one event.
pub fn render(event: &UiEvent) -> Vec<String> {
    match event {
        UiEvent::Notification(n) => {
            let tag = match n.level {
                NotificationLevel::Info => "info",
                NotificationLevel::Success => "ok",
                NotificationLevel::Warning => "aviso",
                NotificationLevel::Error => "erro",
            };
            vec![format!("[{}] {}", tag, n.message)]
        }
        UiEvent::Progress(p) => {
            let mut line = format!(
                "Etapa {}/{} ({}) - {} | próximo: {}",
                p.current, p.total, p.percent, p.step_name, p.next_label
            );
            if !p.can_go_back {
                line.push_str(" | sem voltar");
            }
            vec![line]
        }
        UiEvent::Panel { target, panel } => {
            let area = match target {
                PanelTarget::Analysis => "Análise",
                PanelTarget::SimilarProjects => "Projetos similares",
                PanelTarget::ProjectDetail => "Detalhe",
            };
            let text = match panel {
                PanelState::Running { message }
                | PanelState::Completed { message }
                | PanelState::Failed { message }
                | PanelState::Unavailable { message } => message.clone(),
                PanelState::NotFound { id } => format!("Projeto {} não encontrado", id),
            };
            vec![format!("<{}> {}", area, text)]
        }
        UiEvent::FocusField { field } => vec![format!("> corrija o campo {}", field)],
        UiEvent::AnalysisResult { text } => vec!["Análise IA:".to_string(), text.clone()],
        UiEvent::SimilarProjects { projects } => projects
            .iter()
            .map(|p| {
                format!(
                    "  {} | {} | {} | {} | {} captado",
                    p.id,
                    or_placeholder(&p.name, NO_NAME),
                    location(p),
                    p.approved_display(),
                    p.raised_percentage()
                )
            })
            .collect(),
        UiEvent::ProjectDetail { project } => {
            let mut lines = vec![
                format!("{} ({})", or_placeholder(&project.name, NO_NAME), project.id),
                format!("Proponente: {}", or_placeholder(&project.proponent, NOT_INFORMED)),
                format!(
                    "Área: {} / {}",
                    or_placeholder(&project.area, "Não especificada"),
                    or_placeholder(&project.segment, "Não especificado")
                ),
                format!("Local: {}", location(project)),
                format!(
                    "Aprovado: {} | Captado: {} ({})",
                    project.approved_display(),
                    project.raised_display(),
                    project.raised_percentage()
                ),
                format!("Situação: {}", or_placeholder(&project.status, "Ativo")),
            ];
            if !project.synopsis.is_empty() {
                lines.push(format!("Sinopse: {}", project.synopsis));
            }
            lines
        }
        UiEvent::Statistics { statistics } => vec![format!(
            "SALIC: {} projetos | aprovação {} | valor médio {:.0} | áreas: {}",
            statistics.total_projects,
            statistics.approval_rate,
            statistics.average_value,
            statistics.most_active_areas.join(", ")
        )],
        UiEvent::ChatMessage(m) => {
            let who = match m.role {
                ChatRole::User => "você",
                ChatRole::Assistant => "consultor",
            };
            vec![format!("{}: {}", who, m.content)]
        }
    }
}

const NO_NAME: &str = "Projeto sem nome";
const NOT_INFORMED: &str = "Não informado";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn location(project: &ReferenceProject) -> String {
    format!(
        "{}/{}",
        or_placeholder(&project.municipality, NOT_INFORMED),
        or_placeholder(&project.state, "BR")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;
    use crate::domain::wizard::{ChatMessage, Notification};

    #[test]
    fn renders_notifications_with_level_tag() {
        let lines = render(&UiEvent::Notification(Notification::warning("cuidado")));
        assert_eq!(lines, vec!["[aviso] cuidado"]);
    }

    #[test]
    fn renders_one_line_per_similar_project() {
        let project = ReferenceProject {
            id: ProjectId::new("123"),
            name: "Festival".into(),
            municipality: "Salvador".into(),
            state: "BA".into(),
            approved_value: 1000.0,
            raised_value: 500.0,
            ..ReferenceProject::default()
        };
        let lines = render(&UiEvent::SimilarProjects {
            projects: vec![project.clone(), project],
        });
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  123 | Festival | Salvador/BA | R$ 1.000 | 50% captado");
    }

    #[test]
    fn blank_dataset_fields_render_as_placeholders() {
        let project = ReferenceProject {
            id: ProjectId::new("77"),
            ..ReferenceProject::default()
        };
        let lines = render(&UiEvent::ProjectDetail { project: Box::new(project) });
        assert_eq!(lines[0], "Projeto sem nome (77)");
        assert_eq!(lines[1], "Proponente: Não informado");
        assert_eq!(lines[2], "Área: Não especificada / Não especificado");
        assert_eq!(lines[3], "Local: Não informado/BR");
        assert_eq!(lines[5], "Situação: Ativo");
    }

    #[test]
    fn writes_to_the_given_writer() {
        let presenter = ConsolePresenter::new(Vec::new());
        presenter.emit(UiEvent::ChatMessage(ChatMessage::user("olá")));
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(out, "você: olá\n");
    }
}
