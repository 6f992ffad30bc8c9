//! Shared helpers for the app crate

pub mod logging;
