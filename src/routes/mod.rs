//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the analysis endpoint, the simulation API, and a health probe under
//! one Axum router. CORS allows any origin and the headers browser clients
//! send with the analysis call.

pub mod analyze;
pub mod identity;
pub mod simulations;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Method, StatusCode, header};
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            HeaderName::from_static(identity::CALLER_ID_HEADER),
        ])
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/analyze-email",
            post(analyze::analyze_email)
                .options(analyze::preflight)
                .layer(DefaultBodyLimit::max(analyze::MAX_BODY_BYTES)),
        )
        .route("/api/simulations", get(simulations::list_simulations))
        .route("/api/simulations/progress", get(simulations::list_progress))
        .route("/api/simulations/{id}/progress", put(simulations::update_progress))
        .route("/healthz", get(healthz))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
