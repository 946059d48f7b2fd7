//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use crate::auth::storage::FileTokenStore;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Directory holding the persisted token
    pub data_dir: PathBuf,
    /// Per-request timeout; `None` leaves the transport default
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `api_url_override` - Optional base URL override (from CLI args)
    /// * `data_dir_override` - Optional data directory override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL
    pub fn from_env(
        api_url_override: Option<String>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = api_url_override
            .or_else(|| std::env::var("LOBBY_API_URL").ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let data_dir = data_dir_override
            .or_else(|| std::env::var_os("LOBBY_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let request_timeout = parse_env_or("LOBBY_REQUEST_TIMEOUT_SECS", 0u64);
        let request_timeout = (request_timeout > 0).then(|| Duration::from_secs(request_timeout));

        let config = ClientConfig {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            data_dir,
            request_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base_url).map_err(|e| ConfigError::Invalid {
            var: "LOBBY_API_URL".to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                var: "LOBBY_API_URL".to_string(),
                reason: format!("Unsupported scheme '{}', expected http or https", url.scheme()),
            });
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "LOBBY_DATA_DIR".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Token store rooted at the configured data directory
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(&self.data_dir)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".lobby"))
        .unwrap_or_else(|| std::env::temp_dir().join("lobby"))
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: config tests are serialized, nothing else reads these variables concurrently
        unsafe {
            std::env::remove_var("LOBBY_API_URL");
            std::env::remove_var("LOBBY_DATA_DIR");
            std::env::remove_var("LOBBY_REQUEST_TIMEOUT_SECS");
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ClientConfig::from_env(None, Some(PathBuf::from("/tmp/lobby-test"))).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/lobby-test"));
    }

    #[test]
    #[serial]
    fn test_env_values() {
        clear_env();
        unsafe {
            std::env::set_var("LOBBY_API_URL", "https://api.example.com/v1/");
            std::env::set_var("LOBBY_DATA_DIR", "/var/lib/lobby");
            std::env::set_var("LOBBY_REQUEST_TIMEOUT_SECS", "15");
        }

        let config = ClientConfig::from_env(None, None).unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/lobby"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    #[serial]
    fn test_override_wins_over_env() {
        clear_env();
        unsafe {
            std::env::set_var("LOBBY_API_URL", "https://env.example.com");
            std::env::set_var("LOBBY_REQUEST_TIMEOUT_SECS", "not a number");
        }

        let config =
            ClientConfig::from_env(Some("http://127.0.0.1:9000".to_string()), None).unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    #[serial]
    fn test_invalid_url_rejected() {
        clear_env();
        let err = ClientConfig::from_env(Some("not-a-valid-url".to_string()), None).unwrap_err();
        assert!(err.to_string().contains("LOBBY_API_URL"));

        let err = ClientConfig::from_env(Some("ftp://example.com".to_string()), None).unwrap_err();
        assert!(err.to_string().contains("Unsupported scheme"));
    }
}
