//! Domain types and models

pub mod appointment;
pub mod call;
pub mod client;
pub mod event;
pub mod user;

pub use appointment::{
    Appointment, AppointmentDraft, AppointmentPatch, AppointmentStats, AppointmentStatus,
};
pub use call::{
    Call, CallDirection, CallDisplayStatus, CallDraft, CallPatch, CallStats, CallStatus,
};
pub use client::{ClientDraft, ClientPatch, ClientRecord};
pub use event::{ChangeEvent, ChangeOp};
pub use user::{AuthSession, UserProfile, UserRole};

/// Report a raw value that did not match any known enumeration variant.
///
/// The fallback itself is kept for liveness (a bad row must not wedge the
/// dashboard), but the condition is surfaced loudly in debug builds so data
/// corruption cannot hide behind the default.
pub(crate) fn report_unmapped(kind: &str, raw: &str, fallback: &str) {
    if cfg!(debug_assertions) {
        tracing::error!(kind, raw, fallback, "unmapped value, substituting fallback");
    } else {
        tracing::warn!(kind, raw, fallback, "unmapped value, substituting fallback");
    }
}
