//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types used by both the
//! wizard and the SALIC reference data.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::ValidationError;
pub use ids::ProjectId;
pub use percentage::Percentage;
pub use timestamp::Timestamp;
