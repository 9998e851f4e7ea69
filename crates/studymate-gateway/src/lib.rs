//! # StudyMate Gateway
//!
//! Axum HTTP front door for the study-assistant client:
//!
//! - `GET  /api/health`    — liveness + whether the catalog loaded
//! - `GET  /api/materials` — the full topic catalog
//! - `POST /api/chat`      — run the retrieval pipeline for one question
//!
//! The gateway owns the error boundary: any failure out of the pipeline is
//! logged server-side and mapped to a generic 500 body. No provider error
//! detail ever reaches the client.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, run};
