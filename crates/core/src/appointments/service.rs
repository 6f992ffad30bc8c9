//! Appointment service - scoped reads, validated writes

use std::sync::Arc;

use chrono::Utc;
use frontdesk_domain::constants::APPOINTMENT_FETCH_LIMIT;
use frontdesk_domain::validation::validate_appointment_draft;
use frontdesk_domain::{
    Appointment, AppointmentDraft, AppointmentPatch, AppointmentStats, AppointmentStatus,
    FrontdeskError, Result,
};
use tracing::info;
use uuid::Uuid;

use super::ports::AppointmentStore;
use crate::policy::TenantScope;
use crate::stats::appointment_stats;

/// Appointment operations against the backend store.
///
/// Stateless: every operation takes the caller's [`TenantScope`] so one
/// service instance serves every caller. The tenant guard runs on every
/// mutation path, not just reads.
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
}

impl AppointmentService {
    /// Create a new appointment service over a store port.
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Appointments visible to the caller, ascending by scheduled time.
    pub async fn list(&self, scope: &TenantScope) -> Result<Vec<Appointment>> {
        self.store.list(scope, APPOINTMENT_FETCH_LIMIT).await
    }

    /// Count-by-status projection of the caller's visible appointments.
    pub async fn stats(&self, scope: &TenantScope) -> Result<AppointmentStats> {
        let appointments = self.list(scope).await?;
        Ok(appointment_stats(&appointments))
    }

    /// Create an appointment from a validated draft.
    ///
    /// The record is always created in `scheduled` state under the caller's
    /// organization (an elevated caller must name the target organization).
    pub async fn create(
        &self,
        scope: &TenantScope,
        organization: Option<Uuid>,
        draft: AppointmentDraft,
    ) -> Result<Appointment> {
        validate_appointment_draft(&draft)?;
        let organization_id = scope.creation_org(organization)?;

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            organization_id,
            customer_name: draft.customer_name,
            customer_phone: draft.customer_phone,
            customer_email: draft.customer_email,
            scheduled_at: draft.scheduled_at,
            duration_minutes: draft.duration_minutes,
            service_type: draft.service_type,
            status: AppointmentStatus::Scheduled,
            notes: draft.notes,
            reminders_sent: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(&appointment).await?;
        info!(appointment_id = %stored.id, organization_id = %organization_id, "appointment created");
        Ok(stored)
    }

    /// Transition an appointment's status, optionally replacing the note.
    pub async fn update_status(
        &self,
        scope: &TenantScope,
        id: Uuid,
        status: AppointmentStatus,
        notes: Option<String>,
    ) -> Result<Appointment> {
        let current = self.load_guarded(scope, id).await?;
        current.status.ensure_transition(status)?;

        let patch = AppointmentPatch {
            status: Some(status),
            notes,
            reminders_sent: None,
            updated_at: Some(Utc::now()),
        };
        let updated = self.store.update(id, &patch).await?;
        info!(appointment_id = %id, status = status.as_str(), "appointment status updated");
        Ok(updated)
    }

    /// Record a reminder dispatch by appending to the reminder log.
    pub async fn send_reminder(&self, scope: &TenantScope, id: Uuid) -> Result<Appointment> {
        let current = self.load_guarded(scope, id).await?;

        let mut reminders = current.reminders_sent;
        let now = Utc::now();
        reminders.push(now);

        let patch = AppointmentPatch {
            status: None,
            notes: None,
            reminders_sent: Some(reminders),
            updated_at: Some(now),
        };
        let updated = self.store.update(id, &patch).await?;
        info!(appointment_id = %id, "reminder recorded");
        Ok(updated)
    }

    /// Permanently delete an appointment.
    pub async fn delete(&self, scope: &TenantScope, id: Uuid) -> Result<()> {
        self.load_guarded(scope, id).await?;
        self.store.delete(id).await?;
        info!(appointment_id = %id, "appointment deleted");
        Ok(())
    }

    /// Fetch a record and verify the caller's scope permits touching it.
    async fn load_guarded(&self, scope: &TenantScope, id: Uuid) -> Result<Appointment> {
        let appointment = self
            .store
            .fetch(id)
            .await?
            .ok_or_else(|| FrontdeskError::NotFound(format!("appointment {id}")))?;
        scope.ensure_permits(appointment.organization_id)?;
        Ok(appointment)
    }
}
