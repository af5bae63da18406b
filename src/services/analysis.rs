//! Analysis service: turns email text into a prompt, then a risk label.
//!
//! DESIGN
//! ======
//! One completion call per request, then one best-effort insert. The risk
//! label comes from [`derive_risk`], a keyword match on the model's free-text
//! answer, and is the only code that interprets model output. Wording changes
//! in the model's reply can flip the label.
//!
//! Validation order matters: caller identity, then content, then LLM
//! configuration. Each check fails before any outbound call is made.

use serde::Serialize;
use tracing::info;

use super::persistence::{PersistedAnalysis, record_best_effort};
use crate::llm::types::{CompletionRequest, LlmError};
use crate::state::AppState;

const HIGH_RISK_MARKER: &str = "high risk";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

/// Normalized result returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub risk: RiskLevel,
    pub explanation: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("User ID is required")]
    MissingCaller,
    #[error("Email content is required")]
    EmptyContent,
    #[error("OpenAI API key is not configured")]
    LlmNotConfigured,
    #[error(transparent)]
    Upstream(#[from] LlmError),
}

/// A validated analysis request: non-empty content from an identified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub content: String,
    pub caller_id: String,
}

impl AnalysisRequest {
    /// Validate raw inputs. The caller is checked before the content.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::MissingCaller`] for an absent or blank caller id,
    /// [`AnalysisError::EmptyContent`] for absent or whitespace-only content.
    pub fn new(content: Option<String>, caller_id: Option<String>) -> Result<Self, AnalysisError> {
        let caller_id = caller_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(AnalysisError::MissingCaller)?;
        let content = content
            .filter(|c| !c.trim().is_empty())
            .ok_or(AnalysisError::EmptyContent)?;
        Ok(Self { content, caller_id })
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Build the fixed analysis prompt. `content` is embedded verbatim.
#[must_use]
pub fn build_prompt(content: &str) -> String {
    format!(
        "Analyze the following email content for potential phishing attempts. Consider:\n\
         1. Urgency or pressure tactics\n\
         2. Grammar and spelling errors\n\
         3. Suspicious links or requests\n\
         4. Impersonation attempts\n\
         5. Unusual sender addresses\n\
         \n\
         Provide a risk assessment (high/low) and detailed explanation.\n\
         \n\
         Email content:\n\
         {content}\n"
    )
}

/// `High` if `text` mentions "high risk" in any case, `Low` otherwise.
#[must_use]
pub fn derive_risk(text: &str) -> RiskLevel {
    if text.to_lowercase().contains(HIGH_RISK_MARKER) { RiskLevel::High } else { RiskLevel::Low }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one analysis: completion call, risk derivation, best-effort insert.
///
/// # Errors
///
/// [`AnalysisError::LlmNotConfigured`] when no completion client is set, and
/// [`AnalysisError::Upstream`] when the completion call fails. Nothing is
/// persisted in either case.
pub async fn analyze_email(state: &AppState, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
    let llm = state.llm.as_ref().ok_or(AnalysisError::LlmNotConfigured)?;
    info!(caller_id = %request.caller_id, content_len = request.content.len(), "analysis: request received");

    let completion = llm
        .complete(&CompletionRequest {
            prompt: build_prompt(&request.content),
            max_tokens: state.analysis.max_tokens,
            temperature: state.analysis.temperature,
        })
        .await?;

    let risk = derive_risk(&completion.text);
    info!(
        caller_id = %request.caller_id,
        risk = risk.as_str(),
        model = %completion.model,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        "analysis: completed"
    );

    let record = PersistedAnalysis::new(&request.content, risk, &completion.text, &request.caller_id);
    record_best_effort(state.store.as_deref(), &record).await;

    Ok(AnalysisResult { risk, explanation: completion.text })
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
