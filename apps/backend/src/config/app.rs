use std::env;
use std::time::Duration;

use super::store::{non_empty_var, StoreProfile};
use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL, MAX_TOKEN_TTL};

/// Everything `main` needs to boot, read once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
    pub store: StoreProfile,
    /// Stripe secret key; payment routes answer CONFIG_ERROR without it
    pub payment_secret_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match non_empty_var("BACKEND_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => 5000,
        };

        let secret = non_empty_var("ACCESS_TOKEN_SECRET").ok_or_else(|| {
            AppError::config("Required environment variable 'ACCESS_TOKEN_SECRET' is not set")
        })?;
        let ttl = match non_empty_var("ACCESS_TOKEN_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 && secs <= MAX_TOKEN_TTL.as_secs() => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "ACCESS_TOKEN_TTL_SECS must be between 1 and {}, got '{raw}'",
                        MAX_TOKEN_TTL.as_secs()
                    )))
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            host,
            port,
            security: SecurityConfig::new(secret.into_bytes()).with_token_ttl(ttl),
            store: StoreProfile::from_env()?,
            payment_secret_key: non_empty_var("PAYMENT_SECRET_KEY"),
        })
    }
}
