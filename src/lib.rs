//! ONA - Lei Rouanet grant application wizard
//!
//! A step-by-step wizard that turns a project idea into a grant proposal,
//! with AI suggestions from a relay service and reference projects from the
//! federal SALIC dataset.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
