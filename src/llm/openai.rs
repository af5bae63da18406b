//! OpenAI-compatible API client.
//!
//! Supports the `/chat/completions` endpoint (prompt sent as one user
//! message) and the legacy `/completions` endpoint (raw prompt string).

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::config::{LlmTimeouts, OpenAiApiMode};
use super::types::{Completion, CompletionRequest, LlmError};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    mode: OpenAiApiMode,
}

impl OpenAiClient {
    /// Build a client for an OpenAI-compatible endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the reqwest client cannot be built.
    pub fn new(api_key: String, mode: OpenAiApiMode, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, mode })
    }

    pub async fn complete(&self, model: &str, request: &CompletionRequest) -> Result<Completion, LlmError> {
        match self.mode {
            OpenAiApiMode::ChatCompletions => {
                let messages = [CcMessage { role: "user", content: &request.prompt }];
                let body = CcRequest {
                    model,
                    max_tokens: request.max_tokens,
                    temperature: request.temperature,
                    messages: &messages,
                };
                let text = self.send_json("/chat/completions", &body).await?;
                parse_chat_completions_response(&text)
            }
            OpenAiApiMode::Completions => {
                let body = LegacyRequest {
                    model,
                    prompt: &request.prompt,
                    max_tokens: request.max_tokens,
                    temperature: request.temperature,
                };
                let text = self.send_json("/completions", &body).await?;
                parse_completions_response(&text)
            }
        }
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: &'a [CcMessage<'a>],
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct LegacyRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Parse a `/chat/completions` body. Text comes from `choices[0].message.content`.
pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<Completion, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let text = first_choice(&root)
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str);
    Ok(completion_from(&root, text))
}

/// Parse a legacy `/completions` body. Text comes from `choices[0].text`.
pub(crate) fn parse_completions_response(json_text: &str) -> Result<Completion, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let text = first_choice(&root)
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str);
    Ok(completion_from(&root, text))
}

fn first_choice(root: &Value) -> Option<&Value> {
    root.get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
}

fn completion_from(root: &Value, text: Option<&str>) -> Completion {
    let usage = |key: &str| {
        root.get("usage")
            .and_then(|u| u.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };
    Completion {
        text: text.map(str::trim).unwrap_or_default().to_string(),
        model: root
            .get("model")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default(),
        input_tokens: usage("prompt_tokens"),
        output_tokens: usage("completion_tokens"),
    }
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
