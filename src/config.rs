//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Optional JSON file with initial store contents
    pub seed_path: Option<String>,
    /// Google Places API key. Nearby search stays local-only without it.
    pub places_api_key: Option<String>,
    /// Upper bound on a single Places API call
    pub places_timeout: Duration,
    /// Lifetime of a freshly issued session
    pub session_ttl_days: i64,
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PLACES_TIMEOUT_MS: u64 = 3000;
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", DEFAULT_PORT)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            seed_path: non_empty_var("SEED_PATH"),
            places_api_key: non_empty_var("PLACES_API_KEY"),
            places_timeout: Duration::from_millis(parse_var(
                "PLACES_TIMEOUT_MS",
                DEFAULT_PLACES_TIMEOUT_MS,
            )?),
            session_ttl_days: parse_var("SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS)?,
        })
    }

    /// Config for tests: no external calls, no seed file.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            frontend_url: "http://localhost:8081".to_string(),
            seed_path: None,
            places_api_key: None,
            places_timeout: Duration::from_millis(DEFAULT_PLACES_TIMEOUT_MS),
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name, raw)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "9090");
        env::set_var("PLACES_API_KEY", "  ");
        env::set_var("SESSION_TTL_DAYS", "7");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.places_api_key, None);
        assert_eq!(config.session_ttl_days, 7);

        env::set_var("PLACES_TIMEOUT_MS", "soon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PLACES_TIMEOUT_MS", _))
        ));

        env::remove_var("PORT");
        env::remove_var("PLACES_API_KEY");
        env::remove_var("SESSION_TTL_DAYS");
        env::remove_var("PLACES_TIMEOUT_MS");
    }
}
