//! Adapters - Implementations of the port interfaces.
//!
//! - `salic` - SALIC dataset client and CORS relays
//! - `relay` - AI suggestion relay
//! - `storage` - Session persistence
//! - `presenter` - Terminal and recording presenters

pub mod presenter;
pub mod relay;
pub mod salic;
pub mod storage;
