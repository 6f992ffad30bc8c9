//! Shared HTTP client with retry and timeout support

mod client;

pub use client::{HttpClient, HttpClientBuilder};
