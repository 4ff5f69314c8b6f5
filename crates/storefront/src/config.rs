//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FOODCHAIN_WALLET_CONNECT_DELAY_MS` - Simulated wallet connect delay (default: 2000)
//! - `FOODCHAIN_SOCIAL_LOGIN_DELAY_MS` - Simulated social login delay (default: 1500)
//! - `FOODCHAIN_CATALOG_PATH` - JSON product catalog (default: built-in seed)
//! - `FOODCHAIN_PROPOSALS_PATH` - JSON proposal list (default: built-in seed)
//! - `FOODCHAIN_CURRENCY` - Currency for cart subtotals (default: USD)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: development)
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use foodchain_core::CurrencyCode;

const DEFAULT_WALLET_CONNECT_DELAY_MS: u64 = 2000;
const DEFAULT_SOCIAL_LOGIN_DELAY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// How long a wallet connect takes
    pub wallet_connect_delay: Duration,
    /// How long a social login takes
    pub social_login_delay: Duration,
    /// Product catalog file; `None` uses the built-in seed
    pub catalog_path: Option<PathBuf>,
    /// Proposal list file; `None` uses the built-in seed
    pub proposals_path: Option<PathBuf>,
    /// Currency used for cart subtotals
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: String,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            wallet_connect_delay: Duration::from_millis(DEFAULT_WALLET_CONNECT_DELAY_MS),
            social_login_delay: Duration::from_millis(DEFAULT_SOCIAL_LOGIN_DELAY_MS),
            catalog_path: None,
            proposals_path: None,
            currency: CurrencyCode::default(),
            sentry_dsn: None,
            sentry_environment: "development".to_string(),
            sentry_sample_rate: 1.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let wallet_connect_delay = Duration::from_millis(env.parse_or(
            "FOODCHAIN_WALLET_CONNECT_DELAY_MS",
            DEFAULT_WALLET_CONNECT_DELAY_MS,
        )?);
        let social_login_delay = Duration::from_millis(env.parse_or(
            "FOODCHAIN_SOCIAL_LOGIN_DELAY_MS",
            DEFAULT_SOCIAL_LOGIN_DELAY_MS,
        )?);
        let currency = env.parse_or("FOODCHAIN_CURRENCY", CurrencyCode::default())?;

        let sentry_sample_rate: f32 = env.parse_or("SENTRY_SAMPLE_RATE", 1.0)?;
        if !(0.0..=1.0).contains(&sentry_sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SENTRY_SAMPLE_RATE".to_string(),
                format!("must be between 0.0 and 1.0 (got {sentry_sample_rate})"),
            ));
        }

        Ok(Self {
            wallet_connect_delay,
            social_login_delay,
            catalog_path: env.optional("FOODCHAIN_CATALOG_PATH").map(PathBuf::from),
            proposals_path: env.optional("FOODCHAIN_PROPOSALS_PATH").map(PathBuf::from),
            currency,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.or_default("SENTRY_ENVIRONMENT", "development"),
            sentry_sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
