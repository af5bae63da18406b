//! LLM: completion adapter for the phishing analyzer.
//!
//! DESIGN
//! ======
//! Configured from environment variables. `LlmClient` wraps an
//! OpenAI-compatible client and exposes it through the provider-neutral
//! [`CompletionApi`] trait so the analysis service can be tested with mocks.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::CompletionApi;
use types::{Completion, CompletionRequest, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: openai::OpenAiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the mode is unknown, or the
    /// HTTP client fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner =
            openai::OpenAiClient::new(config.api_key, config.openai_mode, config.openai_base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    /// Return the configured model name (e.g. `"gpt-4o-mini"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl CompletionApi for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        self.inner.complete(&self.model, request).await
    }
}
