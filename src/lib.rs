//! Phishing email analysis service.
//!
//! An HTTP endpoint forwards submitted email text to an LLM completion API,
//! labels the reply high or low risk, and records the analysis in Postgres
//! on a best-effort basis. The `client` module is the requester side of the
//! same flow.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod routes;
pub mod services;
pub mod state;
