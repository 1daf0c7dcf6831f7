//! Configuration loading.
//!
//! [`ConfigService`] is a snapshot of the process environment (after `.env`
//! has been applied). [`ServerConfig`] is the typed view the rest of the
//! service reads.

use crate::controller::ErrorPolicy;
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Key/value configuration store
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot the environment, applying a `.env` file first when present
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "Failed to load .env file");
            }
        }

        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Parse `key` when set, otherwise fall back to `default`
    pub fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => {
                let parsed = raw.trim().parse::<T>();
                parsed.map_err(|e| ConfigError::Invalid {
                    key,
                    value: raw,
                    reason: e.to_string(),
                })
            }
            None => Ok(default),
        }
    }
}

/// Page request defaults applied by the list-paged route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_size: usize,
    pub max_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 2000,
        }
    }
}

/// Server configuration
///
/// | Env Var                | Default                   |
/// |------------------------|---------------------------|
/// | `HOST`                 | `0.0.0.0`                 |
/// | `PORT`                 | `8080`                    |
/// | `PUBLIC_URL`           | `http://localhost:{PORT}` |
/// | `ERROR_POLICY`         | `collapsed`               |
/// | `PAGE_DEFAULT_SIZE`    | `20`                      |
/// | `PAGE_MAX_SIZE`        | `2000`                    |
/// | `REQUEST_TIMEOUT_SECS` | `30`                      |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin used to build absolute hypermedia links.
    pub public_url: String,
    pub error_policy: ErrorPolicy,
    pub paging: PagingConfig,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_url: "http://localhost:8080".to_string(),
            error_policy: ErrorPolicy::default(),
            paging: PagingConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn from_config(config: &ConfigService) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = config.get("HOST").unwrap_or(defaults.host);
        let port = config.parse_or("PORT", defaults.port)?;
        let public_url = config
            .get("PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();
        let error_policy = config.parse_or("ERROR_POLICY", defaults.error_policy)?;

        let default_size = config.parse_or("PAGE_DEFAULT_SIZE", defaults.paging.default_size)?;
        let max_size = config.parse_or("PAGE_MAX_SIZE", defaults.paging.max_size)?;
        if default_size == 0 || max_size == 0 {
            return Err(ConfigError::Invalid {
                key: "PAGE_DEFAULT_SIZE",
                value: default_size.to_string(),
                reason: "page sizes must be positive".to_string(),
            });
        }
        if default_size > max_size {
            return Err(ConfigError::Invalid {
                key: "PAGE_DEFAULT_SIZE",
                value: default_size.to_string(),
                reason: format!("must not exceed PAGE_MAX_SIZE ({max_size})"),
            });
        }

        let timeout_secs =
            config.parse_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;

        Ok(Self {
            host,
            port,
            public_url,
            error_policy,
            paging: PagingConfig {
                default_size,
                max_size,
            },
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::from_config(&ConfigService::default()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.public_url, "http://localhost:8080");
        assert_eq!(config.error_policy, ErrorPolicy::Collapsed);
        assert_eq!(config.paging, PagingConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_are_parsed() {
        let service = ConfigService::default();
        service.set("PORT", "9090");
        service.set("PUBLIC_URL", "https://plans.example.org/");
        service.set("ERROR_POLICY", "typed");
        service.set("PAGE_DEFAULT_SIZE", "5");
        service.set("PAGE_MAX_SIZE", "50");

        let config = ServerConfig::from_config(&service).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.public_url, "https://plans.example.org");
        assert_eq!(config.error_policy, ErrorPolicy::Typed);
        assert_eq!(config.paging.default_size, 5);
        assert_eq!(config.paging.max_size, 50);
    }

    #[test]
    fn public_url_follows_port_when_unset() {
        let service = ConfigService::default();
        service.set("PORT", "3000");
        let config = ServerConfig::from_config(&service).unwrap();
        assert_eq!(config.public_url, "http://localhost:3000");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let service = ConfigService::default();
        service.set("PORT", "eighty");
        assert!(ServerConfig::from_config(&service).is_err());

        let service = ConfigService::default();
        service.set("ERROR_POLICY", "lenient");
        let err = ServerConfig::from_config(&service).unwrap_err();
        assert!(err.to_string().contains("ERROR_POLICY"));

        let service = ConfigService::default();
        service.set("PAGE_DEFAULT_SIZE", "100");
        service.set("PAGE_MAX_SIZE", "10");
        assert!(ServerConfig::from_config(&service).is_err());
    }
}
