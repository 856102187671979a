//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_client::{ApiConfig, ConfigError, API_PATH_VAR, BASE_URL_VAR, TIMEOUT_VAR};

/// Default log filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn,shop=info";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shop API settings.
    #[serde(default)]
    pub api: ApiSection,

    /// Logging settings.
    #[serde(default)]
    pub log: LogSection,
}

/// `[api]` section. Every key is optional; missing ones come from the
/// environment or the values baked in at build time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    /// API host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Store path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// `[log]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSection {
    /// `tracing` filter directives.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Command-line values that beat everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub api_path: Option<String>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Build the API settings: flags, then environment, then this file,
    /// then the build-time defaults.
    pub fn api_config(
        &self,
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ApiConfig, ConfigError> {
        let lookup = |key: &str| -> Option<String> {
            let flag = match key {
                BASE_URL_VAR => overrides.base_url.clone(),
                API_PATH_VAR => overrides.api_path.clone(),
                _ => None,
            };
            let file = match key {
                BASE_URL_VAR => self.api.base_url.clone(),
                API_PATH_VAR => self.api.api_path.clone(),
                TIMEOUT_VAR => self.api.timeout_secs.map(|s| s.to_string()),
                _ => None,
            };
            flag.or_else(|| env(key)).or(file)
        };

        let built = ApiConfig::from_build_env().ok();
        ApiConfig::resolve(
            lookup,
            built.as_ref().map(|c| c.base_url.as_str()),
            built.as_ref().map(|c| c.api_path.as_str()),
        )
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config(base_url: &str, api_path: &str) -> String {
    format!(
        r#"# Shop CLI configuration

[api]
base_url = "{base_url}"
api_path = "{api_path}"
timeout_secs = 15

[log]
# Overridden by RUST_LOG and --verbose
filter = "{DEFAULT_LOG_FILTER}"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn file_config() -> CliConfig {
        toml::from_str(&generate_default_config("https://file.example", "file-store")).unwrap()
    }

    #[test]
    fn test_generated_config_parses() {
        let config = file_config();
        assert_eq!(config.api.base_url.as_deref(), Some("https://file.example"));
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.log.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_file_values_used_without_env_or_flags() {
        let api = file_config()
            .api_config(&Overrides::default(), |_| None)
            .unwrap();
        assert_eq!(api.api_root(), "https://file.example/v2/api/file-store");
        assert_eq!(api.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_env_beats_file_and_flags_beat_env() {
        let env = |key: &str| match key {
            BASE_URL_VAR => Some("https://env.example".to_string()),
            API_PATH_VAR => Some("env-store".to_string()),
            TIMEOUT_VAR => Some("3".to_string()),
            _ => None,
        };

        let api = file_config().api_config(&Overrides::default(), env).unwrap();
        assert_eq!(api.base_url, "https://env.example");
        assert_eq!(api.timeout, Duration::from_secs(3));

        let flags = Overrides {
            base_url: None,
            api_path: Some("flag-store".to_string()),
        };
        let api = file_config().api_config(&flags, env).unwrap();
        assert_eq!(api.base_url, "https://env.example");
        assert_eq!(api.api_path, "flag-store");
    }

    #[test]
    fn test_empty_log_section_defaults() {
        let config: CliConfig = toml::from_str("[api]\napi_path = \"x\"\n").unwrap();
        assert_eq!(config.log.filter, DEFAULT_LOG_FILTER);
        assert!(config.api.base_url.is_none());
    }
}
