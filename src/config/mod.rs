//! Application configuration module
//!
//! Configuration is read from an optional `ona.toml` file and then from
//! environment variables with the `ONA` prefix; nested values use double
//! underscores (`ONA__SALIC__CACHE_TTL_SECS=60`). Every value has a default.
//!
//! # Example
//!
//! ```no_run
//! use ona_wizard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod logging;
mod relay;
mod salic;
mod wizard;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use relay::RelayConfig;
pub use salic::{ProxyConfig, ProxyKind, SalicConfig};
pub use wizard::WizardConfig;

use serde::Deserialize;
use std::path::Path;

/// File read by [`AppConfig::load`] when present.
pub const DEFAULT_CONFIG_FILE: &str = "ona.toml";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Wizard flow and session storage
    #[serde(default)]
    pub wizard: WizardConfig,

    /// SALIC dataset client
    #[serde(default)]
    pub salic: SalicConfig,

    /// AI suggestion relay
    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `ona.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Like [`AppConfig::load`] with an explicit optional file.
    ///
    /// Environment variables override file values. The relay list can only
    /// be replaced from the file.
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(config::Environment::default().prefix("ONA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.wizard.validate()?;
        self.salic.validate()?;
        self.relay.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn missing_file() -> &'static Path {
        Path::new("does-not-exist/ona.toml")
    }

    #[test]
    fn defaults_without_any_source() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = AppConfig::load_from(missing_file()).unwrap();

        assert_eq!(config.wizard.total_steps, 9);
        assert_eq!(config.salic.proxies.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ONA__SALIC__CACHE_TTL_SECS", "60");
        env::set_var("ONA__WIZARD__STORAGE_KEY", "teste");
        let result = AppConfig::load_from(missing_file());
        env::remove_var("ONA__SALIC__CACHE_TTL_SECS");
        env::remove_var("ONA__WIZARD__STORAGE_KEY");

        let config = result.unwrap();
        assert_eq!(config.salic.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.wizard.storage_key, "teste");
    }

    #[test]
    fn file_replaces_proxy_list() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[salic]
display_limit = 3

[[salic.proxies]]
name = "local"
kind = "all_origins"
prefix = "http://localhost:8080/get?url="
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.salic.display_limit, 3);
        assert_eq!(config.salic.proxies.len(), 1);
        assert_eq!(config.salic.proxies[0].kind, ProxyKind::AllOrigins);
        assert!(!config.salic.proxies[0].send_api_key);
    }

    #[test]
    fn validate_reports_first_bad_section() {
        let mut config = AppConfig::default();
        config.relay.timeout_secs = 0;
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTimeout("relay.timeout_secs"))
        );
    }
}
