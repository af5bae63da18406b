//! Caller identity extraction.
//!
//! The `x-user-id` header asserts which signed-in user issued the request.
//! It is checked for presence only; the bearer `Authorization` header is
//! forwarded by clients but not verified here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::services::analysis::AnalysisError;

pub const CALLER_ID_HEADER: &str = "x-user-id";

/// Identified caller. Use as a handler parameter to require `x-user-id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_id_from_headers(&parts.headers)
            .map(Self)
            .ok_or_else(|| AnalysisError::MissingCaller.into())
    }
}

/// Non-blank `x-user-id` value, if any.
pub(crate) fn caller_id_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(CALLER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
