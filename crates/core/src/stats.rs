//! Aggregate statistics computation
//!
//! Pure folds over a collection snapshot. Recomputed after every mutation or
//! applied change event; same snapshot, same output.

use frontdesk_domain::{Appointment, AppointmentStats, Call, CallStats};

/// Count-by-status projection of an appointment snapshot.
pub fn appointment_stats(appointments: &[Appointment]) -> AppointmentStats {
    let mut stats = AppointmentStats::default();
    for appointment in appointments {
        stats.record(appointment.status);
    }
    stats
}

/// Aggregate projection of a call snapshot.
///
/// The average duration counts a missing duration as zero seconds while
/// keeping the full collection as divisor, mirroring the dashboard's
/// long-standing divisor semantics. An empty snapshot yields exactly zero
/// for every ratio and average.
pub fn call_stats(calls: &[Call]) -> CallStats {
    let mut stats = CallStats::default();
    let mut duration_sum: i64 = 0;
    let mut converted: u64 = 0;

    for call in calls {
        stats.record(call.display_status());
        duration_sum += call.duration_seconds().unwrap_or(0);
        if call.outcome.as_deref() == Some(frontdesk_domain::constants::CONVERSION_OUTCOME) {
            converted += 1;
        }
    }

    if stats.total > 0 {
        let total = stats.total as f64;
        stats.success_rate = stats.completed as f64 / total;
        stats.conversion_rate = converted as f64 / total;
        stats.avg_duration_seconds = duration_sum as f64 / total;
    }

    stats
}
