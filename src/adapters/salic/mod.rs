//! SALIC Adapters
//!
//! Client for the federal SALIC dataset and the relays used to reach it.
//!
//! ## Available Adapters
//!
//! - `SalicClient` - Query, diversified search and lookup with two caches
//! - `PassthroughProxy` - Relay returning the dataset body unchanged
//! - `AllOriginsProxy` - Relay wrapping the body in a `contents` envelope
//! - `MockProxyRelay` - Configurable mock for testing

mod all_origins_proxy;
mod client;
mod http_proxy;
mod mock_proxy;
mod passthrough_proxy;
mod query_cache;
mod recently_displayed;

pub use all_origins_proxy::{unwrap_all_origins, AllOriginsProxy};
pub use client::SalicClient;
pub use http_proxy::RelayEndpoint;
pub use mock_proxy::MockProxyRelay;
pub use passthrough_proxy::{unwrap_passthrough, PassthroughProxy};
pub use query_cache::QueryCache;
pub use recently_displayed::RecentlyDisplayed;
