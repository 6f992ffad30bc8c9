//! Appointment entity and its status lifecycle
//!
//! One collapsed shape replaces the divergent record variants the dashboard
//! used to juggle; store rows adapt to this definition at the infra boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::report_unmapped;
use crate::errors::{FrontdeskError, Result};
use crate::validation::{FieldError, ValidationErrors};

/// Lifecycle status of an appointment.
///
/// Transitions are staff-initiated only; there is no timeout-driven
/// transition anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 5] =
        [Self::Scheduled, Self::Confirmed, Self::Completed, Self::Cancelled, Self::NoShow];

    /// Wire representation used by the backend store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Strict parse of a raw status string.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "scheduled" => Some(Self::Scheduled),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "no_show" => Some(Self::NoShow),
            _ => None,
        }
    }

    /// Tolerant parse: unknown input falls back to `Scheduled` and is
    /// reported (error level in debug builds).
    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            report_unmapped("appointment_status", raw, "scheduled");
            Self::Scheduled
        })
    }

    /// Completed, cancelled, and no-show appointments accept no further
    /// transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Whether a staff-initiated transition from `self` to `next` is valid.
    ///
    /// Cancellation and no-show are reachable from any non-terminal state;
    /// completion is reachable directly from `scheduled` as well as from
    /// `confirmed`.
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Scheduled | Self::Confirmed => {
                next != self && !matches!(next, Self::Scheduled)
            }
            _ => false,
        }
    }

    /// Validate a transition, producing a field-level validation error on
    /// rejection.
    pub fn ensure_transition(self, next: Self) -> Result<()> {
        if self.can_transition_to(next) {
            return Ok(());
        }
        Err(FrontdeskError::Validation(ValidationErrors::from(vec![FieldError::new(
            "status",
            format!("cannot transition from {} to {}", self.as_str(), next.as_str()),
        )])))
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

/// An appointment on an organization's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    /// Owning tenant.
    pub organization_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    /// Scheduled start, UTC.
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub service_type: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    /// Timestamps of every reminder dispatched for this appointment.
    #[serde(default)]
    pub reminders_sent: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Whether at least one reminder has been dispatched.
    pub fn reminder_sent(&self) -> bool {
        !self.reminders_sent.is_empty()
    }
}

/// Staff-entered draft for a new appointment.
///
/// Validated before any network call; the service assigns id, organization,
/// and the initial `scheduled` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub service_type: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for an appointment row.
///
/// `None` fields are omitted from the wire payload and never clobber stored
/// values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders_sent: Option<Vec<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Count-by-status projection of an appointment collection.
///
/// Invariant: the per-status counts always sum to `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStats {
    pub total: u64,
    pub scheduled: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub no_show: u64,
}

impl AppointmentStats {
    /// Add one appointment with the given status to the projection.
    pub fn record(&mut self, status: AppointmentStatus) {
        self.total += 1;
        match status {
            AppointmentStatus::Scheduled => self.scheduled += 1,
            AppointmentStatus::Confirmed => self.confirmed += 1,
            AppointmentStatus::Completed => self.completed += 1,
            AppointmentStatus::Cancelled => self.cancelled += 1,
            AppointmentStatus::NoShow => self.no_show += 1,
        }
    }

    /// Sum of the per-status counts; equals `total` by construction.
    pub fn status_sum(&self) -> u64 {
        self.scheduled + self.confirmed + self.completed + self.cancelled + self.no_show
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_total_and_stable() {
        for status in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
            // Same input, same output on every call.
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_falls_back_to_scheduled() {
        assert_eq!(AppointmentStatus::parse_or_default("tentative"), AppointmentStatus::Scheduled);
    }

    #[test]
    fn scheduled_allows_confirm_complete_cancel_and_no_show() {
        let from = AppointmentStatus::Scheduled;
        assert!(from.can_transition_to(AppointmentStatus::Confirmed));
        assert!(from.can_transition_to(AppointmentStatus::Completed));
        assert!(from.can_transition_to(AppointmentStatus::Cancelled));
        assert!(from.can_transition_to(AppointmentStatus::NoShow));
        assert!(!from.can_transition_to(AppointmentStatus::Scheduled));
    }

    #[test]
    fn terminal_statuses_reject_all_transitions() {
        for from in [
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            for next in AppointmentStatus::ALL {
                assert!(!from.can_transition_to(next));
            }
            assert!(from.is_terminal());
        }
    }

    #[test]
    fn ensure_transition_reports_both_states() {
        let err = AppointmentStatus::Completed
            .ensure_transition(AppointmentStatus::Confirmed)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("completed"));
        assert!(message.contains("confirmed"));
    }

    #[test]
    fn reminder_flag_derives_from_the_log() {
        let mut appointment: Appointment = serde_json::from_value(serde_json::json!({
            "id": "8c0c73f6-6f3f-4a86-a5ff-3f2fc71acb2e",
            "organization_id": "73d65a90-22bb-4280-9a2f-9f25d13f7c0b",
            "customer_name": "Dana Webb",
            "customer_phone": "4155550142",
            "customer_email": null,
            "scheduled_at": "2025-03-01T15:00:00Z",
            "duration_minutes": 30,
            "service_type": null,
            "status": "scheduled",
            "notes": null,
            "created_at": "2025-02-20T10:00:00Z",
            "updated_at": "2025-02-20T10:00:00Z"
        }))
        .unwrap();

        assert!(!appointment.reminder_sent());
        appointment.reminders_sent.push(Utc::now());
        assert!(appointment.reminder_sent());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Confirmed),
            ..AppointmentPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "confirmed" }));
    }
}
