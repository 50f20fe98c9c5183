//! Configuration module for the catalog admin service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the storefront REST API, without trailing slash
    pub api_base_url: String,
    /// Bearer token used to open the initial storefront session
    pub api_token: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Timeout applied to every upstream request
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("CATALOG_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let api_token = env::var("CATALOG_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let bind_addr = env::var("CATALOG_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid CATALOG_BIND_ADDR: {}", e)))?;

        let log_level = env::var("CATALOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let timeout_secs: u64 = env::var("CATALOG_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|e| {
                AppError::Config(format!("Invalid CATALOG_REQUEST_TIMEOUT_SECS: {}", e))
            })?;

        Ok(Self {
            api_base_url,
            api_token,
            bind_addr,
            log_level,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        env::remove_var("CATALOG_API_BASE_URL");
        env::remove_var("CATALOG_API_TOKEN");
        env::remove_var("CATALOG_BIND_ADDR");
        env::remove_var("CATALOG_LOG_LEVEL");
        env::remove_var("CATALOG_REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert!(config.api_token.is_none());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("CATALOG_API_BASE_URL", "https://shop.example.com/api/");
        env::set_var("CATALOG_API_TOKEN", "   ");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "https://shop.example.com/api");
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("CATALOG_REQUEST_TIMEOUT_SECS", "soon");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
