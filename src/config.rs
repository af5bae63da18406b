//! Process configuration loaded from environment variables.
//!
//! LLM settings live in [`crate::llm::config`]; this module covers the
//! listener, the optional database, and the analysis request budget.

use std::str::FromStr;

use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ANALYSIS_MAX_TOKENS: u32 = 500;
pub const DEFAULT_ANALYSIS_TEMPERATURE: f32 = 0.7;

/// Output budget and sampling temperature sent with every analysis prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self { max_tokens: DEFAULT_ANALYSIS_MAX_TOKENS, temperature: DEFAULT_ANALYSIS_TEMPERATURE }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// `None` disables persistence and the simulation routes.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub analysis: AnalysisSettings,
}

impl AppConfig {
    /// Load from `PORT`, `DATABASE_URL`, `DB_MAX_CONNECTIONS`,
    /// `ANALYSIS_MAX_TOKENS` and `ANALYSIS_TEMPERATURE`.
    ///
    /// Unparsable values fall back to their defaults with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            analysis: AnalysisSettings {
                max_tokens: env_parse("ANALYSIS_MAX_TOKENS", DEFAULT_ANALYSIS_MAX_TOKENS),
                temperature: env_parse("ANALYSIS_TEMPERATURE", DEFAULT_ANALYSIS_TEMPERATURE),
            },
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    raw.trim().parse::<T>().unwrap_or_else(|_| {
        warn!(key, value = %raw, "invalid env value, using default");
        default
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
