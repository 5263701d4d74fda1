//! Suggestion Relay Adapters
//!
//! - `HttpSuggestionRelay` - POSTs text to the local AI relay service
//! - `MockSuggestionRelay` - Configurable mock for testing

mod http_relay;
mod mock_relay;

pub use http_relay::{parse_suggestion, HttpRelayConfig, HttpSuggestionRelay};
pub use mock_relay::MockSuggestionRelay;
