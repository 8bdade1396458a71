//! # aviola-api
//!
//! HTTP API layer for Aviola built on Axum.
//!
//! Provides the storefront REST endpoints, bearer-token auth,
//! middleware (CORS, compression, request logging), extractors, DTOs,
//! and error mapping.

pub mod app;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_memory_state, build_postgres_state};
pub use state::AppState;
