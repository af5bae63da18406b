//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and identity plumbing.

pub mod analysis;
pub mod persistence;
pub mod simulation;
