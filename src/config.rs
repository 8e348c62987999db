//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cep::DEFAULT_BASE_URL;
use crate::i18n::Locale;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// BrasilAPI base URL
    pub brasil_api_url: String,

    /// Timeout for a single CEP lookup
    pub cep_timeout: Duration,

    /// Locale used when the request carries no supported Accept-Language
    pub default_locale: Locale,

    /// Log output format (`LOG_FORMAT`: pretty or json)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let brasil_api_url =
            env::var("BRASIL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let cep_timeout_secs: u64 = env::var("CEP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CEP_TIMEOUT_SECS"))?;

        let default_locale = match env::var("DEFAULT_LOCALE") {
            Ok(tag) => Locale::from_tag(&tag).ok_or(ConfigError::InvalidValue("DEFAULT_LOCALE"))?,
            Err(_) => Locale::En,
        };

        let log_format = parse_log_format(env::var("LOG_FORMAT").ok().as_deref())?;

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            brasil_api_url,
            cep_timeout: Duration::from_secs(cep_timeout_secs),
            default_locale,
            log_format,
        })
    }
}

fn parse_log_format(value: Option<&str>) -> Result<LogFormat, ConfigError> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("pretty") => Ok(LogFormat::Pretty),
        Some("json") => Ok(LogFormat::Json),
        Some(_) => Err(ConfigError::InvalidValue("LOG_FORMAT")),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_format() {
        assert_eq!(parse_log_format(None).unwrap(), LogFormat::Pretty);
        assert_eq!(parse_log_format(Some("JSON")).unwrap(), LogFormat::Json);
        assert!(matches!(
            parse_log_format(Some("xml")),
            Err(ConfigError::InvalidValue("LOG_FORMAT"))
        ));
    }
}
