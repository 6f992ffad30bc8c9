//! Structured logging setup
//!
//! One subscriber for the whole process: env-filtered, human-readable by
//! default, JSON when `FRONTDESK_LOG_JSON` is set (for log shippers).

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to `info` for our crates and `warn` for
/// everything else. Calling this twice is a no-op (the second registration
/// fails quietly), which keeps tests that share a process happy.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,frontdesk=info,frontdesk_app=info"));

    let builder = fmt().with_env_filter(filter).with_target(true);

    let result = if std::env::var("FRONTDESK_LOG_JSON").is_ok() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
