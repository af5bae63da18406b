//! HTTP transport for the analysis endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `ClientError` values whose `Display` text is what the user
//! sees. Non-2xx replies prefer the server's `error` field and fall back to
//! `Error: <status>`; transport failures keep reqwest's message.

use serde_json::{Value, json};

use crate::routes::identity::CALLER_ID_HEADER;
use crate::services::analysis::{AnalysisResult, RiskLevel};

pub const ANALYZE_PATH: &str = "/api/analyze-email";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Please enter email content to analyze")]
    EmptyContent,
    #[error("Please sign in to use the email analyzer")]
    NotSignedIn,
    #[error("Analysis already in progress")]
    Busy,
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Network(String),
    #[error("Invalid response format")]
    InvalidResponse,
}

/// Sends one analysis request. Enables transport fakes in tests.
#[async_trait::async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Submit `content` on behalf of `caller_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Server`], [`ClientError::Network`] or
    /// [`ClientError::InvalidResponse`].
    async fn submit(&self, content: &str, caller_id: &str) -> Result<AnalysisResult, ClientError>;
}

/// reqwest-backed [`AnalysisTransport`].
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    anon_key: String,
}

impl HttpTransport {
    /// `base_url` is the server origin, e.g. `https://edu.example`.
    #[must_use]
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: analyze_endpoint(base_url),
            anon_key: anon_key.into(),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisTransport for HttpTransport {
    async fn submit(&self, content: &str, caller_id: &str) -> Result<AnalysisResult, ClientError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.anon_key)
            .header(CALLER_ID_HEADER, caller_id)
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(ClientError::Server(error_message(status.as_u16(), &body)));
        }
        parse_result(&body)
    }
}

pub(crate) fn analyze_endpoint(base_url: &str) -> String {
    format!("{}{ANALYZE_PATH}", base_url.trim_end_matches('/'))
}

/// User-facing message for a non-2xx reply.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| format!("Error: {status}"))
}

/// Parse a 2xx body. `risk` must be a string; anything but `"high"` renders low.
pub(crate) fn parse_result(body: &str) -> Result<AnalysisResult, ClientError> {
    let value: Value = serde_json::from_str(body).map_err(|_| ClientError::InvalidResponse)?;
    let risk = value
        .get("risk")
        .and_then(Value::as_str)
        .ok_or(ClientError::InvalidResponse)?;
    let explanation = value
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let risk = if risk == RiskLevel::High.as_str() { RiskLevel::High } else { RiskLevel::Low };
    Ok(AnalysisResult { risk, explanation })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
