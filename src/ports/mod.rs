//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Persistence of the wizard session snapshot
//! - `ProxyRelay` - One CORS relay in front of the SALIC dataset
//! - `ReferenceCatalog` - Diversified search and lookup of SALIC projects
//! - `SuggestionRelay` - Client side of the AI suggestion endpoint
//! - `Presenter` - Sink for notifications, progress and panels

mod presenter;
mod proxy_relay;
mod reference_catalog;
mod session_store;
mod suggestion_relay;

pub use presenter::{PanelState, PanelTarget, Presenter, UiEvent};
pub use proxy_relay::{ProxyError, ProxyRelay};
pub use reference_catalog::{ProxyAttempt, ReferenceCatalog, SalicError};
pub use session_store::{SessionStore, SessionStoreError};
pub use suggestion_relay::{RelayError, RelayRequest, RelaySuggestion, SuggestionRelay};
