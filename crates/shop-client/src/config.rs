//! Client configuration.
//!
//! The base URL and API path come from the environment. The browser
//! build has no process environment, so the values seen by the compiler
//! are baked in as defaults; native builds may override them at runtime.

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the API host (e.g. `https://ec-course-api.hexschool.io`).
pub const BASE_URL_VAR: &str = "SHOP_BASE_URL";
/// Environment variable holding the store path segment.
pub const API_PATH_VAR: &str = "SHOP_API_PATH";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "SHOP_TIMEOUT_SECS";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const BUILD_BASE_URL: Option<&str> = option_env!("SHOP_BASE_URL");
const BUILD_API_PATH: Option<&str> = option_env!("SHOP_API_PATH");

/// Where and how to reach the shop API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API host, without trailing slash.
    pub base_url: String,
    /// Store identifier in `/v2/api/{api_path}`.
    pub api_path: String,
    /// Per-request timeout (ignored in the browser).
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration.
    pub fn new(base_url: impl Into<String>, api_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_path: api_path.into().trim_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configuration captured from the environment at build time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::resolve(|_| None, BUILD_BASE_URL, BUILD_API_PATH)
    }

    /// Configuration from the process environment, falling back to the
    /// build-time values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok(), BUILD_BASE_URL, BUILD_API_PATH)
    }

    /// Resolve from a variable lookup with explicit fallbacks.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        fallback_base_url: Option<&str>,
        fallback_api_path: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let base_url = non_empty(lookup(BASE_URL_VAR))
            .or_else(|| non_empty(fallback_base_url.map(str::to_string)))
            .ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let api_path = non_empty(lookup(API_PATH_VAR))
            .or_else(|| non_empty(fallback_api_path.map(str::to_string)))
            .ok_or(ConfigError::Missing(API_PATH_VAR))?;

        let mut config = Self::new(base_url, api_path);

        if let Some(raw) = non_empty(lookup(TIMEOUT_VAR)) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: TIMEOUT_VAR,
                message: format!("expected whole seconds, got {:?}", raw),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: BASE_URL_VAR,
                message: format!("expected an http(s) URL, got {:?}", self.base_url),
            });
        }
        if self.api_path.is_empty() || self.api_path.contains('/') {
            return Err(ConfigError::Invalid {
                key: API_PATH_VAR,
                message: format!("expected a single path segment, got {:?}", self.api_path),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: TIMEOUT_VAR,
                message: "timeout must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Root every endpoint hangs off: `{base_url}/v2/api/{api_path}`.
    pub fn api_root(&self) -> String {
        format!("{}/v2/api/{}", self.base_url, self.api_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_resolve_from_variables() {
        let config = ApiConfig::resolve(
            lookup(&[
                (BASE_URL_VAR, "https://ec-course-api.hexschool.io/"),
                (API_PATH_VAR, "/my-store/"),
            ]),
            None,
            None,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://ec-course-api.hexschool.io");
        assert_eq!(config.api_path, "my-store");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(
            config.api_root(),
            "https://ec-course-api.hexschool.io/v2/api/my-store"
        );
    }

    #[test]
    fn test_fallbacks_apply_when_variables_are_absent() {
        let config = ApiConfig::resolve(
            lookup(&[(API_PATH_VAR, "")]),
            Some("https://api.example.com"),
            Some("fallback-store"),
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.api_path, "fallback-store");
    }

    #[test]
    fn test_missing_values_are_reported() {
        let err = ApiConfig::resolve(lookup(&[]), None, None).unwrap_err();
        assert_eq!(err, ConfigError::Missing(BASE_URL_VAR));

        let err = ApiConfig::resolve(lookup(&[(BASE_URL_VAR, "https://a.io")]), None, None)
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing(API_PATH_VAR));
    }

    #[test]
    fn test_timeout_override() {
        let config = ApiConfig::resolve(
            lookup(&[
                (BASE_URL_VAR, "https://a.io"),
                (API_PATH_VAR, "store"),
                (TIMEOUT_VAR, "3"),
            ]),
            None,
            None,
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));

        let err = ApiConfig::resolve(
            lookup(&[
                (BASE_URL_VAR, "https://a.io"),
                (API_PATH_VAR, "store"),
                (TIMEOUT_VAR, "soon"),
            ]),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: TIMEOUT_VAR, .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ApiConfig::new("ftp://a.io", "store").validate().is_err());
        assert!(ApiConfig::new("https://a.io", "a/b").validate().is_err());
        assert!(ApiConfig::new("https://a.io", "store")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
