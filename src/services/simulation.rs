//! Simulation service: training catalog and per-user progress.
//!
//! The catalog is read-only here. Progress rows are upserted on
//! `(user_id, simulation_id)`; `completed_at` tracks the status.

use std::str::FromStr;

use serde::Serialize;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

const MAX_SCORE: i32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("simulation not found: {0}")]
    NotFound(Uuid),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("score must be between 0 and 100, got {0}")]
    InvalidScore(i32),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for ProgressStatus {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(SimulationError::InvalidStatus(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressEntry {
    pub simulation_id: Uuid,
    pub title: String,
    pub status: String,
    pub score: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

/// Validate a score against the `0..=100` range.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidScore`] when out of range.
pub fn validate_score(score: i32) -> Result<i32, SimulationError> {
    if (0..=MAX_SCORE).contains(&score) { Ok(score) } else { Err(SimulationError::InvalidScore(score)) }
}

/// `completed_at` value for a status change made at `now`.
#[must_use]
pub fn completed_at_for(status: ProgressStatus, now: OffsetDateTime) -> Option<OffsetDateTime> {
    (status == ProgressStatus::Completed).then_some(now)
}

/// List the catalog, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_simulations(pool: &PgPool) -> Result<Vec<Simulation>, SimulationError> {
    let rows = sqlx::query_as::<_, (Uuid, String, String, String, OffsetDateTime)>(
        "SELECT id, title, description, difficulty, created_at FROM simulations ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, title, description, difficulty, created_at)| Simulation {
            id,
            title,
            description,
            difficulty,
            created_at,
        })
        .collect())
}

/// List one user's progress joined with simulation titles.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_progress(pool: &PgPool, user_id: &str) -> Result<Vec<ProgressEntry>, SimulationError> {
    let rows = sqlx::query_as::<_, (Uuid, String, String, i32, Option<OffsetDateTime>)>(
        "SELECT p.simulation_id, s.title, p.status, p.score, p.completed_at \
         FROM simulation_progress p JOIN simulations s ON s.id = p.simulation_id \
         WHERE p.user_id = $1 ORDER BY s.created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(simulation_id, title, status, score, completed_at)| ProgressEntry {
            simulation_id,
            title,
            status,
            score,
            completed_at,
        })
        .collect())
}

/// Upsert a user's progress on one simulation and return the refreshed list.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidStatus`] or [`SimulationError::InvalidScore`]
/// for bad input, [`SimulationError::NotFound`] for an unknown simulation, or a
/// database error.
pub async fn update_progress(
    pool: &PgPool,
    user_id: &str,
    simulation_id: Uuid,
    status: &str,
    score: i32,
) -> Result<Vec<ProgressEntry>, SimulationError> {
    let status = status.parse::<ProgressStatus>()?;
    let score = validate_score(score)?;

    let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM simulations WHERE id = $1")
        .bind(simulation_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(SimulationError::NotFound(simulation_id));
    }

    sqlx::query(
        "INSERT INTO simulation_progress (user_id, simulation_id, status, score, completed_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, now()) \
         ON CONFLICT (user_id, simulation_id) DO UPDATE \
         SET status = EXCLUDED.status, score = EXCLUDED.score, \
             completed_at = EXCLUDED.completed_at, updated_at = now()",
    )
    .bind(user_id)
    .bind(simulation_id)
    .bind(status.as_str())
    .bind(score)
    .bind(completed_at_for(status, OffsetDateTime::now_utc()))
    .execute(pool)
    .await?;

    list_progress(pool, user_id).await
}

#[cfg(test)]
#[path = "simulation_test.rs"]
mod tests;
