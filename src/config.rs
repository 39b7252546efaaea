/*
 * Responsibility
 * - Read process configuration from the environment (.env is honoured)
 * - Validate values up front: a missing secret or a malformed offset fails startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::AppError;

/// Offset the session expiration is computed in when `TOKEN_EXPIRY_UTC_OFFSET` is unset.
pub const DEFAULT_EXPIRY_UTC_OFFSET: &str = "-03:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // HMAC-SHA256 key shared by issuance and validation
    pub token_secret: String,
    pub expiry_offset: FixedOffset,
    // JSON file seeding the identity directory
    pub identities_path: Option<PathBuf>,
    pub request_timeout: Duration,
    pub request_body_limit: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("token_secret", &"<redacted>")
            .field("expiry_offset", &self.expiry_offset)
            .field("identities_path", &self.identities_path)
            .field("request_timeout", &self.request_timeout)
            .field("request_body_limit", &self.request_body_limit)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` feeds the process environment; tests feed a map.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = var("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());

        let token_secret = var("TOKEN_SECRET").ok_or(ConfigError::Missing("TOKEN_SECRET"))?;
        if token_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("TOKEN_SECRET"));
        }

        let expiry_offset = match var("TOKEN_EXPIRY_UTC_OFFSET") {
            Some(raw) => parse_utc_offset(raw.trim())
                .ok_or(ConfigError::Invalid("TOKEN_EXPIRY_UTC_OFFSET"))?,
            None => parse_utc_offset(DEFAULT_EXPIRY_UTC_OFFSET)
                .ok_or(ConfigError::Invalid("TOKEN_EXPIRY_UTC_OFFSET"))?,
        };

        let identities_path = var("IDENTITIES_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let request_timeout = var("REQUEST_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let request_body_limit = var("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Config {
            addr,
            app_env,
            token_secret,
            expiry_offset,
            identities_path,
            request_timeout,
            request_body_limit,
        })
    }
}

/// Parse a `±HH:MM` offset such as `-03:00`.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    // chrono also takes `+0300` and `+03`; only the colon form is accepted here.
    if value.len() != 6 || value.as_bytes()[3] != b':' {
        return None;
    }
    value.parse::<FixedOffset>().ok()
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        tracing::error!(error = %e, "configuration rejected");
        AppError::Internal
    }
}
