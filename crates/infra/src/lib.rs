//! # Frontdesk Infra
//!
//! Infrastructure adapters for the core ports:
//! - Hosted-store REST client and per-entity store adapters
//! - Password auth client against the hosted auth service
//! - Realtime change-feed client (SSE with reconnect)
//! - Configuration loader (env-first with file fallback)
//! - Retrying HTTP client shared by every adapter

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod realtime;
pub mod store;

pub use auth::AuthClient;
pub use config::loader as config_loader;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use realtime::{RealtimeClient, RealtimeClientConfig};
pub use store::{
    StoreAppointments, StoreCalls, StoreClient, StoreClients, StoreUsers,
};
