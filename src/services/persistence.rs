//! Persistence service: append-only analysis records.
//!
//! ERROR HANDLING
//! ==============
//! Analysis records are telemetry, not part of the caller-visible contract.
//! [`record_best_effort`] logs a failed insert and returns normally; the HTTP
//! response never depends on the store.

use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

use super::analysis::RiskLevel;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One analyzed email. Mirrors the `phishing_analyses` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAnalysis {
    pub id: Uuid,
    pub email_content: String,
    pub risk_level: RiskLevel,
    pub analysis_result: String,
    pub user_id: String,
    pub created_at: OffsetDateTime,
}

impl PersistedAnalysis {
    #[must_use]
    pub fn new(email_content: &str, risk_level: RiskLevel, analysis_result: &str, user_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email_content: email_content.to_owned(),
            risk_level,
            analysis_result: analysis_result.to_owned(),
            user_id: user_id.to_owned(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Append-only sink for analysis records. Enables failure injection in tests.
#[async_trait::async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Insert one record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn append(&self, record: &PersistedAnalysis) -> Result<(), StoreError>;
}

/// `PostgreSQL`-backed [`AnalysisStore`].
pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn append(&self, record: &PersistedAnalysis) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO phishing_analyses (id, email_content, risk_level, analysis_result, user_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(&record.email_content)
        .bind(record.risk_level.as_str())
        .bind(&record.analysis_result)
        .bind(&record.user_id)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Append `record` if a store is configured. Failures are logged and swallowed.
pub async fn record_best_effort(store: Option<&dyn AnalysisStore>, record: &PersistedAnalysis) {
    let Some(store) = store else {
        info!(analysis_id = %record.id, "persistence disabled, analysis not recorded");
        return;
    };
    if let Err(e) = store.append(record).await {
        error!(error = %e, analysis_id = %record.id, user_id = %record.user_id, "failed to save analysis");
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
