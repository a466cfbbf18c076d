//! Axum-powered web front-end for ResearchDesk.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
