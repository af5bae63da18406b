//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    /// `/chat/completions` with the prompt as a single user message.
    ChatCompletions,
    /// Legacy `/completions` with a raw prompt string.
    Completions,
}

/// Optional outbound timeouts. `None` leaves the reqwest default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub openai_mode: OpenAiApiMode,
    pub openai_base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Optional:
    /// - `LLM_API_KEY_ENV`: names the env var containing the key (default `OPENAI_API_KEY`)
    /// - `LLM_MODEL`: mode default when absent
    /// - `LLM_OPENAI_MODE`: `chat_completions` (default) or `completions`
    /// - `LLM_OPENAI_BASE_URL`: default OpenAI API base URL
    /// - `LLM_REQUEST_TIMEOUT_SECS`: unset means no explicit timeout
    /// - `LLM_CONNECT_TIMEOUT_SECS`: unset means no explicit timeout
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key variable is unset or
    /// empty, and [`LlmError::ConfigParse`] for an unknown mode.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = std::env::var("LLM_API_KEY_ENV").unwrap_or_else(|_| DEFAULT_API_KEY_ENV.to_string());
        let api_key = std::env::var(&key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey { var: key_var.clone() })?;

        let openai_mode = parse_openai_mode(std::env::var("LLM_OPENAI_MODE").ok().as_deref())?;
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| default_model(openai_mode).to_string());
        let openai_base_url = std::env::var("LLM_OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = LlmTimeouts {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS"),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS"),
        };

        Ok(Self { api_key, model, openai_mode, openai_base_url, timeouts })
    }
}

fn env_parse_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse::<u64>().ok())
}

fn parse_openai_mode(raw: Option<&str>) -> Result<OpenAiApiMode, LlmError> {
    match raw.unwrap_or("chat_completions") {
        "chat_completions" => Ok(OpenAiApiMode::ChatCompletions),
        "completions" => Ok(OpenAiApiMode::Completions),
        other => Err(LlmError::ConfigParse(format!(
            "unsupported openai_api mode '{other}' (expected 'chat_completions' or 'completions')"
        ))),
    }
}

fn default_model(mode: OpenAiApiMode) -> &'static str {
    match mode {
        OpenAiApiMode::ChatCompletions => "gpt-4o-mini",
        OpenAiApiMode::Completions => "gpt-3.5-turbo-instruct",
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
