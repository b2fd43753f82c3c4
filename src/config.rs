use std::env;
use std::path::PathBuf;

use crate::records_fetch::{DEFAULT_SEASON, DEFAULT_SKATER_URL, DEFAULT_WINNER_URL};

const DEFAULT_PICKS_FILE: &str = "2026 Olympics Picks - Sheet1.csv";

/// Runtime configuration. Everything has a default; env vars (usually via
/// .env) override, and the first CLI argument overrides the picks path.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub picks_path: PathBuf,
    pub season: String,
    pub skater_url: String,
    pub winner_url: String,
}

impl PoolConfig {
    pub fn from_env() -> Self {
        let picks_path = env::args()
            .nth(1)
            .and_then(non_empty)
            .or_else(|| env_non_empty("POOL_PICKS_FILE"))
            .unwrap_or_else(|| DEFAULT_PICKS_FILE.to_string());

        Self {
            picks_path: PathBuf::from(picks_path),
            season: env_non_empty("POOL_SEASON").unwrap_or_else(|| DEFAULT_SEASON.to_string()),
            skater_url: env_non_empty("POOL_SKATER_API_URL")
                .unwrap_or_else(|| DEFAULT_SKATER_URL.to_string()),
            winner_url: env_non_empty("POOL_WINNER_API_URL")
                .unwrap_or_else(|| DEFAULT_WINNER_URL.to_string()),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().and_then(non_empty)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
