//! Simulation catalog and progress routes.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::identity::CallerId;
use crate::error::ApiError;
use crate::services::simulation::{self, ProgressEntry, Simulation};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    pub status: String,
    pub score: i32,
}

fn require_pool(state: &AppState) -> Result<&PgPool, ApiError> {
    state
        .pool
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("database not configured".into()))
}

/// `GET /api/simulations`: the catalog, oldest first.
pub async fn list_simulations(State(state): State<AppState>) -> Result<Json<Vec<Simulation>>, ApiError> {
    let pool = require_pool(&state)?;
    Ok(Json(simulation::list_simulations(pool).await?))
}

/// `GET /api/simulations/progress`: the caller's progress.
pub async fn list_progress(
    State(state): State<AppState>,
    caller: CallerId,
) -> Result<Json<Vec<ProgressEntry>>, ApiError> {
    let pool = require_pool(&state)?;
    Ok(Json(simulation::list_progress(pool, &caller.0).await?))
}

/// `PUT /api/simulations/{id}/progress`: upsert, then return the refreshed list.
pub async fn update_progress(
    State(state): State<AppState>,
    caller: CallerId,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ProgressUpdate>, JsonRejection>,
) -> Result<Json<Vec<ProgressEntry>>, ApiError> {
    let Path(simulation_id) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Json(update) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let pool = require_pool(&state)?;
    let entries = simulation::update_progress(pool, &caller.0, simulation_id, &update.status, update.score).await?;
    Ok(Json(entries))
}
