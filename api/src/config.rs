use std::env;

use anyhow::Context;

/// Token bucket settings for the rating endpoint (per peer IP)
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Seconds it takes to refill one request
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst_size: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Path prefix all recipe routes are nested under (e.g. "/api"), empty for none
    pub api_prefix: String,
    /// Take the voter IP from the first X-Forwarded-For entry instead of the peer address
    pub trust_forwarded_for: bool,
    pub rating_limit: RateLimit,
    /// Create tables and indexes on startup if they are missing
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = RateLimit::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            api_prefix: normalize_prefix(&env::var("API_PREFIX").unwrap_or_default()),
            trust_forwarded_for: flag("TRUST_FORWARDED_FOR", false),
            rating_limit: RateLimit {
                per_second: parse_var("RATING_PER_SECOND", defaults.per_second)?,
                burst_size: parse_var("RATING_BURST", defaults.burst_size)?,
            },
            run_migrations: flag("RUN_MIGRATIONS", true),
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

/// "api/" and "/api/" both become "/api"; "" and "/" mean no prefix
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
