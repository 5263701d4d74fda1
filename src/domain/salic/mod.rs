//! SALIC reference data - normalized projects from the federal dataset.

mod money;
mod normalize;
mod reference_project;
mod statistics;
mod strategy;
mod text_repair;

pub use money::{format_brl, parse_money, parse_money_str};
pub use normalize::{extract_records, normalize_project};
pub use reference_project::ReferenceProject;
pub use statistics::SalicStatistics;
pub use strategy::{lookup_pages, QueryFilters, SearchPolicy, SearchStrategy, OFFSETS, STATES};
pub use text_repair::{clean_text, has_mojibake, repair_text};
