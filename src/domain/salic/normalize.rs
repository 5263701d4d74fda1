//! Normalization of raw SALIC records.
//!
//! The dataset is inconsistent about field casing (`nome` vs `NomeProjeto`),
//! so each field is read from an ordered list of candidate keys. A key only
//! counts when its value is "present": not null, not an empty string, not
//! `false` and not zero.

use serde_json::Value;

use crate::domain::foundation::ProjectId;

use super::money::parse_money;
use super::reference_project::ReferenceProject;
use super::text_repair::repair_text;

/// Extracts the list of raw records from a dataset payload.
///
/// Accepts `{_embedded: {projetos: [...]}}`, `{projetos: [...]}` or a bare
/// array. Any other shape yields an empty list.
pub fn extract_records(payload: &Value) -> Vec<Value> {
    if let Some(list) = payload
        .pointer("/_embedded/projetos")
        .and_then(Value::as_array)
    {
        return list.clone();
    }
    if let Some(list) = payload.get("projetos").and_then(Value::as_array) {
        return list.clone();
    }
    match payload {
        Value::Array(list) => list.clone(),
        _ => Vec::new(),
    }
}

/// Builds a [`ReferenceProject`] from one raw record.
pub fn normalize_project(record: &Value) -> ReferenceProject {
    let id = pick_text(record, &["PRONAC", "pronac", "id"])
        .map(ProjectId::new)
        .unwrap_or_else(ProjectId::unknown);

    ReferenceProject {
        id,
        name: text_field(record, &["nome", "NomeProjeto"]),
        proponent: text_field(record, &["proponente", "NomeProponente"]),
        area: text_field(record, &["area", "Area"]),
        segment: text_field(record, &["segmento", "Segmento"]),
        state: pick_text(record, &["uf", "UfProjeto"]).unwrap_or_default(),
        municipality: text_field(record, &["municipio", "Municipio"]),
        approved_value: money_field(record, &["valor_aprovado", "ValorAprovado"]),
        raised_value: money_field(record, &["valor_captado", "ValorCaptado"]),
        project_value: money_field(record, &["valor_projeto", "ValorProjeto"]),
        status: text_field(record, &["situacao", "Situacao"]),
        year: pick_text(record, &["ano_projeto", "AnoProjeto"]),
        synopsis: text_field(record, &["sinopse", "Sinopse"]),
        objectives: text_field(record, &["objetivos", "Objetivos"]),
        justification: text_field(record, &["justificativa", "Justificativa"]),
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn pick<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_present(value))
}

fn pick_text(record: &Value, keys: &[&str]) -> Option<String> {
    match pick(record, keys)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(record: &Value, keys: &[&str]) -> String {
    pick_text(record, keys)
        .map(|raw| repair_text(&raw))
        .unwrap_or_default()
}

fn money_field(record: &Value, keys: &[&str]) -> f64 {
    pick(record, keys).map(parse_money).unwrap_or(0.0)
}
