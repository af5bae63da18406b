//! HTTP error surface.
//!
//! Every failed request is answered with `{"error": "<message>"}` and the
//! status of the matching variant.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::services::analysis::AnalysisError;
use crate::services::simulation::SimulationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::MissingCaller => Self::Unauthorized(e.to_string()),
            AnalysisError::EmptyContent => Self::BadRequest(e.to_string()),
            AnalysisError::LlmNotConfigured => Self::Internal(e.to_string()),
            AnalysisError::Upstream(ref inner) => {
                error!(error = %inner, "analysis: completion failed");
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<SimulationError> for ApiError {
    fn from(e: SimulationError) -> Self {
        match e {
            SimulationError::NotFound(_) => Self::NotFound(e.to_string()),
            SimulationError::InvalidStatus(_) | SimulationError::InvalidScore(_) => Self::BadRequest(e.to_string()),
            SimulationError::Database(ref inner) => {
                error!(error = %inner, "simulation: database error");
                Self::Internal("database error".into())
            }
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
