//! Call entity, the backend lifecycle enumeration, and its display mapping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::report_unmapped;

/// Direction of a call relative to the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallDirection {
    Inbound,
    Outbound,
}

/// Backend lifecycle status of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Initiated,
    Ringing,
    Answered,
    Completed,
    Failed,
    Busy,
    NoAnswer,
}

/// Coarse status shown by the dashboard, derived from [`CallStatus`] via a
/// fixed lookup table. Legacy rows may carry one of these directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallDisplayStatus {
    Pending,
    InProgress,
    Completed,
    Missed,
    Voicemail,
}

impl CallStatus {
    /// Every lifecycle status.
    pub const ALL: [Self; 7] = [
        Self::Initiated,
        Self::Ringing,
        Self::Answered,
        Self::Completed,
        Self::Failed,
        Self::Busy,
        Self::NoAnswer,
    ];

    /// Wire representation used by the backend store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::Ringing => "ringing",
            Self::Answered => "answered",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Busy => "busy",
            Self::NoAnswer => "no_answer",
        }
    }

    /// Strict parse of a raw lifecycle status.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "initiated" => Some(Self::Initiated),
            "ringing" => Some(Self::Ringing),
            "answered" => Some(Self::Answered),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "busy" => Some(Self::Busy),
            "no_answer" => Some(Self::NoAnswer),
            _ => None,
        }
    }

    /// Tolerant parse: unknown input falls back to `Initiated` and is
    /// reported (error level in debug builds).
    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            report_unmapped("call_status", raw, "initiated");
            Self::Initiated
        })
    }

    /// The call has reached a final state and will not change again.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Busy | Self::NoAnswer)
    }

    /// Fixed, total mapping onto the display enumeration.
    ///
    /// An unanswered call rolls to the voicemail bucket; busy and failed
    /// calls count as missed.
    pub fn display(self) -> CallDisplayStatus {
        match self {
            Self::Initiated | Self::Ringing => CallDisplayStatus::Pending,
            Self::Answered => CallDisplayStatus::InProgress,
            Self::Completed => CallDisplayStatus::Completed,
            Self::Failed | Self::Busy => CallDisplayStatus::Missed,
            Self::NoAnswer => CallDisplayStatus::Voicemail,
        }
    }
}

impl<'de> Deserialize<'de> for CallStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

impl CallDisplayStatus {
    /// Every display status.
    pub const ALL: [Self; 5] =
        [Self::Pending, Self::InProgress, Self::Completed, Self::Missed, Self::Voicemail];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Missed => "missed",
            Self::Voicemail => "voicemail",
        }
    }

    /// Parse a raw status that may come from either enumeration: legacy rows
    /// carry a display status directly, newer rows the lifecycle status.
    /// Unknown input falls back to `Pending` and is reported.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "missed" => Self::Missed,
            "voicemail" => Self::Voicemail,
            _ => match CallStatus::parse(raw) {
                Some(status) => status.display(),
                None => {
                    report_unmapped("call_display_status", raw, "pending");
                    Self::Pending
                }
            },
        }
    }
}

/// A call record in an organization's activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub id: Uuid,
    /// Owning tenant.
    pub organization_id: Uuid,
    pub caller_name: String,
    pub caller_phone: String,
    pub direction: CallDirection,
    pub status: CallStatus,
    /// Outcome tag recorded when the call wraps up
    /// (e.g. `appointment_booked`).
    pub outcome: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Call {
    /// Duration derived from the start/end pair; `None` until the call ends.
    pub fn duration_seconds(&self) -> Option<i64> {
        self.ended_at.map(|ended| (ended - self.started_at).num_seconds().max(0))
    }

    /// Display status derived through the fixed mapping table.
    pub fn display_status(&self) -> CallDisplayStatus {
        self.status.display()
    }
}

/// Staff-entered draft for logging a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallDraft {
    pub caller_name: String,
    pub caller_phone: String,
    pub direction: CallDirection,
    pub notes: Option<String>,
}

/// Partial update for a call row; `None` fields are omitted from the wire
/// payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate projection of a call collection.
///
/// Counts are keyed by display status so the dashboard's fixed-shape cards
/// always line up; `sum(counts) == total` holds by construction. Ratios are
/// in `[0, 1]` and an empty collection yields exactly zero for every derived
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallStats {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub missed: u64,
    pub voicemail: u64,
    /// `completed / total`.
    pub success_rate: f64,
    /// Calls tagged with the conversion outcome over `total`.
    pub conversion_rate: f64,
    /// Mean duration with missing durations counted as zero seconds.
    pub avg_duration_seconds: f64,
}

impl CallStats {
    /// Add one call with the given display status to the counts. Derived
    /// ratios are finalized separately once the whole snapshot is folded.
    pub fn record(&mut self, display: CallDisplayStatus) {
        self.total += 1;
        match display {
            CallDisplayStatus::Pending => self.pending += 1,
            CallDisplayStatus::InProgress => self.in_progress += 1,
            CallDisplayStatus::Completed => self.completed += 1,
            CallDisplayStatus::Missed => self.missed += 1,
            CallDisplayStatus::Voicemail => self.voicemail += 1,
        }
    }

    /// Sum of the per-status counts; equals `total` by construction.
    pub fn status_sum(&self) -> u64 {
        self.pending + self.in_progress + self.completed + self.missed + self.voicemail
    }
}
