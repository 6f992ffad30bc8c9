//! Realtime change-feed adapter

mod client;

pub use client::{RealtimeClient, RealtimeClientConfig};
