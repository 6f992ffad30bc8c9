//! # Frontdesk App
//!
//! Composition root and HTTP surface for the Frontdesk backend.
//!
//! This crate contains:
//! - `AppContext`: the dependency-injection container wiring config, the
//!   hosted-store adapters, the auth client, and the core services
//! - The axum router exposing the dashboard operations
//! - Structured-logging setup and the server binary

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;
