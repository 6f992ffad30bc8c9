//! Shared test support for core integration tests

// Not every fixture is used by every integration test binary.
#![allow(dead_code)]

pub mod stores;

use chrono::{DateTime, Duration, Utc};
use frontdesk_domain::{
    Appointment, AppointmentStatus, Call, CallDirection, CallStatus, UserProfile, UserRole,
};
use uuid::Uuid;

/// Appointment fixture scheduled `offset_minutes` from now.
pub fn appointment(org: Uuid, offset_minutes: i64) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: Uuid::new_v4(),
        organization_id: org,
        customer_name: "Dana Webb".to_string(),
        customer_phone: "4155550142".to_string(),
        customer_email: Some("dana@example.com".to_string()),
        scheduled_at: now + Duration::minutes(offset_minutes),
        duration_minutes: 30,
        service_type: Some("consultation".to_string()),
        status: AppointmentStatus::Scheduled,
        notes: None,
        reminders_sent: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// Call fixture created at `created_at` with the given lifecycle status.
pub fn call(org: Uuid, status: CallStatus, created_at: DateTime<Utc>) -> Call {
    Call {
        id: Uuid::new_v4(),
        organization_id: org,
        caller_name: "Alex Johnson".to_string(),
        caller_phone: "4155550138".to_string(),
        direction: CallDirection::Inbound,
        status,
        outcome: None,
        started_at: created_at,
        ended_at: None,
        notes: None,
        transcript: None,
        summary: None,
        created_at,
        updated_at: created_at,
    }
}

/// Staff profile fixture.
pub fn profile(role: UserRole, org: Option<Uuid>) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        organization_id: org,
        email: "staff@frontdesk.dev".to_string(),
        full_name: "Staff Member".to_string(),
        role,
        phone: None,
        is_active: true,
    }
}
