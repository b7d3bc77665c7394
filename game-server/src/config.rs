use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub game_catalog_path: Option<String>,
    pub session_timeout_minutes: u64,
    pub cleanup_interval_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://eco_arcade.db?mode=rwc".to_string()),
            game_catalog_path: env::var("GAME_CATALOG_PATH").ok(),
            session_timeout_minutes: parse_or("SESSION_TIMEOUT_MINUTES", 30),
            cleanup_interval_seconds: parse_or("CLEANUP_INTERVAL_SECONDS", 60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} '{}', using default {}", key, value, default);
            default
        }),
        Err(_) => default,
    }
}
