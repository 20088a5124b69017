//! Environment-driven configuration (spec.md §9a), mirroring
//! `wallet_service::config::Settings`, extended with the Wallet-call retry
//! knobs spec.md §4.4 names (`wallet_timeout_seconds`, `wallet_retry_attempts`,
//! `wallet_retry_backoff_seconds`).

use std::env;
use std::time::Duration;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwks_url: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwks_fetch_timeout: Duration,
    pub db_connect_attempts: u32,
    pub db_connect_retry_delay: Duration,
    pub wallet_base_url: String,
    pub wallet_timeout: Duration,
    pub wallet_retry_attempts: u32,
    pub wallet_retry_backoff_seconds: u64,
    pub risk_base_url: String,
    pub risk_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse_or("PORT", 3001),
            jwks_url: env::var("JWKS_URL").expect("JWKS_URL must be set"),
            jwt_issuer: env_or("JWT_ISSUER", "identity-service"),
            jwt_audience: env_or("JWT_AUDIENCE", "payments-service"),
            jwks_cache_ttl: Duration::from_secs(env_parse_or("JWKS_CACHE_TTL_SECONDS", 300)),
            jwks_fetch_timeout: Duration::from_secs(env_parse_or("JWKS_FETCH_TIMEOUT_SECONDS", 5)),
            db_connect_attempts: env_parse_or("DB_CONNECT_ATTEMPTS", 5),
            db_connect_retry_delay: Duration::from_secs(env_parse_or("DB_CONNECT_RETRY_DELAY_SECONDS", 2)),
            wallet_base_url: env_or("WALLET_BASE_URL", "http://localhost:3000/api/v1/wallets"),
            wallet_timeout: Duration::from_secs(env_parse_or("WALLET_TIMEOUT_SECONDS", 5)),
            wallet_retry_attempts: env_parse_or("WALLET_RETRY_ATTEMPTS", 3),
            wallet_retry_backoff_seconds: env_parse_or("WALLET_RETRY_BACKOFF_SECONDS", 1),
            risk_base_url: env_or("RISK_BASE_URL", "http://localhost:3002"),
            risk_timeout: Duration::from_secs(env_parse_or("RISK_TIMEOUT_SECONDS", 10)),
        }
    }
}
