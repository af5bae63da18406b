//! Client-side analysis requester.
//!
//! ARCHITECTURE
//! ============
//! `session` holds the signed-in identity, `api` speaks HTTP to the analysis
//! endpoint, and `analyzer` tracks the loading/result/error state a UI
//! renders. The session is injected, never global, so the analyzer can be
//! driven in isolation.

pub mod analyzer;
pub mod api;
pub mod session;

pub use analyzer::{AnalyzerView, PhishingAnalyzer};
pub use api::{AnalysisTransport, ClientError, HttpTransport};
pub use session::{AuthSession, SessionUser};
