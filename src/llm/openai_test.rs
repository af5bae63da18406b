use super::*;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;

use crate::state::test_helpers::spawn_router;

// ===== chat completions =====

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "  High risk: urgency tactics detected\n" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 9 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.text, "High risk: urgency tactics detected");
    assert_eq!(resp.model, "gpt-4o-mini");
    assert_eq!(resp.input_tokens, 120);
    assert_eq!(resp.output_tokens, 9);
}

#[test]
fn cc_parse_missing_choices_yields_empty_text() {
    let json = serde_json::json!({ "model": "gpt-4o-mini", "choices": [] }).to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.text.is_empty());
}

#[test]
fn cc_parse_null_content_yields_empty_text() {
    let json = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": null } }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.text.is_empty());
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn cc_parse_invalid_json_errors() {
    assert!(matches!(parse_chat_completions_response("<html>"), Err(LlmError::ApiParse(_))));
}

// ===== legacy completions =====

#[test]
fn legacy_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-3.5-turbo-instruct",
        "choices": [{ "text": "\n\nLow risk. Nothing unusual.", "index": 0 }],
        "usage": { "prompt_tokens": 80, "completion_tokens": 6 }
    })
    .to_string();
    let resp = parse_completions_response(&json).unwrap();
    assert_eq!(resp.text, "Low risk. Nothing unusual.");
    assert_eq!(resp.output_tokens, 6);
}

#[test]
fn legacy_parse_choice_without_text_yields_empty() {
    let json = serde_json::json!({ "choices": [{ "index": 0 }] }).to_string();
    assert!(parse_completions_response(&json).unwrap().text.is_empty());
}

#[test]
fn legacy_parse_non_string_text_yields_empty() {
    let json = serde_json::json!({ "choices": [{ "text": 42 }] }).to_string();
    assert!(parse_completions_response(&json).unwrap().text.is_empty());
}

// ===== HTTP round trip against a local stub =====

fn request() -> CompletionRequest {
    CompletionRequest { prompt: "check this".into(), max_tokens: 500, temperature: 0.7 }
}

#[tokio::test]
async fn chat_completions_sends_prompt_budget_and_bearer() {
    async fn handler(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(headers.get("authorization").unwrap(), "Bearer sk-stub");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 500);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "check this");
        Json(serde_json::json!({ "choices": [{ "message": { "content": "Low risk" } }] }))
    }
    let base = spawn_router(Router::new().route("/chat/completions", post(handler))).await;
    let client =
        OpenAiClient::new("sk-stub".into(), OpenAiApiMode::ChatCompletions, base, LlmTimeouts::default()).unwrap();

    let completion = client.complete("gpt-4o-mini", &request()).await.unwrap();
    assert_eq!(completion.text, "Low risk");
}

#[tokio::test]
async fn legacy_completions_sends_raw_prompt() {
    async fn handler(Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(body["prompt"], "check this");
        assert!(body.get("messages").is_none());
        Json(serde_json::json!({ "choices": [{ "text": "High Risk" }] }))
    }
    let base = spawn_router(Router::new().route("/completions", post(handler))).await;
    let client = OpenAiClient::new("sk-stub".into(), OpenAiApiMode::Completions, base, LlmTimeouts::default()).unwrap();

    let completion = client.complete("gpt-3.5-turbo-instruct", &request()).await.unwrap();
    assert_eq!(completion.text, "High Risk");
}

#[tokio::test]
async fn non_200_status_is_an_api_response_error() {
    async fn handler() -> (StatusCode, &'static str) {
        (StatusCode::TOO_MANY_REQUESTS, "{\"error\":{\"message\":\"quota\"}}")
    }
    let base = spawn_router(Router::new().route("/chat/completions", post(handler))).await;
    let client =
        OpenAiClient::new("sk-stub".into(), OpenAiApiMode::ChatCompletions, base, LlmTimeouts::default()).unwrap();

    let err = client.complete("gpt-4o-mini", &request()).await.unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 429, ref body } if body.contains("quota")));
}
