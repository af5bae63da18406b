//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Requests share no mutable state: it only carries `Arc`-shared clients and
//! immutable analysis settings. Every collaborator is optional so the
//! service can start with the LLM or the database unconfigured.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AnalysisSettings;
use crate::llm::CompletionApi;
use crate::services::persistence::AnalysisStore;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Completion client. `None` if no API key is configured.
    pub llm: Option<Arc<dyn CompletionApi>>,
    /// Analysis record sink. `None` if `DATABASE_URL` is unset.
    pub store: Option<Arc<dyn AnalysisStore>>,
    /// Pool for the simulation routes. `None` if `DATABASE_URL` is unset.
    pub pool: Option<PgPool>,
    pub analysis: AnalysisSettings,
}

impl AppState {
    #[must_use]
    pub fn new(
        llm: Option<Arc<dyn CompletionApi>>,
        store: Option<Arc<dyn AnalysisStore>>,
        pool: Option<PgPool>,
        analysis: AnalysisSettings,
    ) -> Self {
        Self { llm, store, pool, analysis }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
