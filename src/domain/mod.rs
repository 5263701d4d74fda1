//! Domain layer - wizard session state and SALIC reference data.

pub mod foundation;
pub mod salic;
pub mod wizard;
