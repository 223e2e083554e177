//! # Host Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults
//! 2. Config file (`smartmandi.toml` in the platform config dir, or an explicit path)
//! 3. Environment variables (`SMARTMANDI_*`)
//!
//! ## Example File
//! ```toml
//! [api]
//! default_delay_ms = 400
//! search_delay_ms = 200
//! login_delay_ms = 300
//!
//! [session]
//! storage = "file"
//! dir = "/var/lib/smartmandi"
//! key = "smartmandi_auth"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use mandi_mock::MockConfig;
use mandi_session::{SessionConfig, StorageKind};

use crate::error::{AppError, AppResult};

/// Upper bound on any simulated delay.
const MAX_DELAY_MS: u64 = 60_000;

/// Complete host configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Mock API latency.
    #[serde(default)]
    pub api: ApiSettings,

    /// Session storage.
    #[serde(default)]
    pub session: SessionConfig,
}

/// The `[api]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Default: 400
    #[serde(default = "default_delay_ms")]
    pub default_delay_ms: u64,

    /// Default: 200
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,

    /// Default: 300
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    400
}

fn default_search_delay_ms() -> u64 {
    200
}

fn default_login_delay_ms() -> u64 {
    300
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            default_delay_ms: default_delay_ms(),
            search_delay_ms: default_search_delay_ms(),
            login_delay_ms: default_login_delay_ms(),
        }
    }
}

impl ApiSettings {
    pub fn mock_config(&self) -> MockConfig {
        MockConfig::new()
            .default_delay(Duration::from_millis(self.default_delay_ms))
            .search_delay(Duration::from_millis(self.search_delay_ms))
            .login_delay(Duration::from_millis(self.login_delay_ms))
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let delays = [
            ("default_delay_ms", self.api.default_delay_ms),
            ("search_delay_ms", self.api.search_delay_ms),
            ("login_delay_ms", self.api.login_delay_ms),
        ];
        for (name, value) in delays {
            if value > MAX_DELAY_MS {
                return Err(AppError::InvalidConfig(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_DELAY_MS, value
                )));
            }
        }

        self.session.validate()?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `SMARTMANDI_*` overrides read through `var`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let delays = [
            ("SMARTMANDI_DELAY_MS", &mut self.api.default_delay_ms),
            ("SMARTMANDI_SEARCH_DELAY_MS", &mut self.api.search_delay_ms),
            ("SMARTMANDI_LOGIN_DELAY_MS", &mut self.api.login_delay_ms),
        ];
        for (name, slot) in delays {
            if let Some(raw) = var(name) {
                match raw.trim().parse::<u64>() {
                    Ok(ms) => {
                        debug!(var = name, ms, "Overriding delay from environment");
                        *slot = ms;
                    }
                    Err(_) => warn!(var = name, value = %raw, "Ignoring non-numeric delay"),
                }
            }
        }

        if let Some(raw) = var("SMARTMANDI_SESSION_STORAGE") {
            match raw.parse::<StorageKind>() {
                Ok(kind) => {
                    debug!(storage = %kind, "Overriding session storage from environment");
                    self.session.storage = kind;
                }
                Err(e) => warn!(error = %e, "Ignoring session storage override"),
            }
        }

        if let Some(dir) = var("SMARTMANDI_SESSION_DIR") {
            debug!(dir = %dir, "Overriding session directory from environment");
            self.session.dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "smartmandi", "smartmandi")
            .map(|dirs| dirs.config_dir().join("smartmandi.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("smartmandi-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.mock_config(), MockConfig::new());
        assert_eq!(config.session.storage, StorageKind::File);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            search_delay_ms = 50

            [session]
            storage = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.search_delay_ms, 50);
        assert_eq!(config.api.default_delay_ms, 400);
        assert_eq!(config.session.storage, StorageKind::Memory);
        assert_eq!(config.session.key, "smartmandi_auth");
    }

    #[test]
    fn test_load_from_explicit_path() {
        let path = temp_file("[api]\ndefault_delay_ms = 10\n");

        let config = AppConfig::load(Some(path.clone())).unwrap();
        assert_eq!(config.api.default_delay_ms, 10);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let path = temp_file("[api\n");

        assert!(matches!(
            AppConfig::load(Some(path.clone())),
            Err(AppError::ConfigParse(_))
        ));
        assert_eq!(AppConfig::load_or_default(Some(path.clone())), AppConfig::default());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();

        config.apply_overrides(env(&[
            ("SMARTMANDI_DELAY_MS", "0"),
            ("SMARTMANDI_LOGIN_DELAY_MS", "abc"),
            ("SMARTMANDI_SESSION_STORAGE", "memory"),
            ("SMARTMANDI_SESSION_DIR", "/tmp/mandi"),
        ]));

        assert_eq!(config.api.default_delay_ms, 0);
        assert_eq!(config.api.login_delay_ms, 300);
        assert_eq!(config.session.storage, StorageKind::Memory);
        assert_eq!(config.session.dir, Some(PathBuf::from("/tmp/mandi")));
    }

    #[test]
    fn test_unknown_storage_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[("SMARTMANDI_SESSION_STORAGE", "s3")]));
        assert_eq!(config.session.storage, StorageKind::File);
    }

    #[test]
    fn test_validate_rejects_huge_delay() {
        let mut config = AppConfig::default();
        config.api.search_delay_ms = MAX_DELAY_MS + 1;
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }
}
