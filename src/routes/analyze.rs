//! Analysis route: `POST /api/analyze-email`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde_json::Value;

use super::identity::CallerId;
use crate::error::ApiError;
use crate::services::analysis::{self, AnalysisRequest, AnalysisResult};
use crate::state::AppState;

/// Request bodies above this size are rejected with 400.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// `POST /api/analyze-email`: analyze `{"content": "..."}` for phishing risk.
///
/// The body is read leniently: anything that is not a JSON object with a
/// string `content` field is treated as missing content.
pub async fn analyze_email(
    State(state): State<AppState>,
    caller: CallerId,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let body = body.map_err(body_error)?;
    let request = AnalysisRequest::new(content_from_body(&body), Some(caller.0))?;
    let result = analysis::analyze_email(&state, &request).await?;
    Ok(Json(result))
}

/// `OPTIONS /api/analyze-email`: empty 200; CORS headers come from the layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn body_error(e: BytesRejection) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(format!("Email content exceeds {MAX_BODY_BYTES} bytes"))
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

pub(crate) fn content_from_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()?
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
