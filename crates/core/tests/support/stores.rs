//! Mock store implementations for testing
//!
//! In-memory mocks for the core store ports, enabling deterministic unit
//! tests without the hosted backend.

use std::sync::Arc;

use async_trait::async_trait;
use frontdesk_core::{AppointmentStore, CallStore, ClientDirectory, TenantScope, UserDirectory};
use frontdesk_domain::{
    Appointment, AppointmentPatch, Call, CallPatch, ClientPatch, ClientRecord, FrontdeskError,
    Result, UserProfile, UserRole,
};
use parking_lot::Mutex;
use uuid::Uuid;

/// In-memory mock for `AppointmentStore`.
#[derive(Default, Clone)]
pub struct MockAppointmentStore {
    rows: Arc<Mutex<Vec<Appointment>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockAppointmentStore {
    /// Create a mock seeded with the provided appointments.
    pub fn new(rows: Vec<Appointment>) -> Self {
        Self { rows: Arc::new(Mutex::new(rows)), fail_next: Arc::new(Mutex::new(false)) }
    }

    /// Make the next store call fail with a network error.
    pub fn fail_next(&self) {
        *self.fail_next.lock() = true;
    }

    /// Raw snapshot for assertions.
    pub fn rows(&self) -> Vec<Appointment> {
        self.rows.lock().clone()
    }

    fn check_failure(&self) -> Result<()> {
        let mut flag = self.fail_next.lock();
        if *flag {
            *flag = false;
            return Err(FrontdeskError::Network("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentStore for MockAppointmentStore {
    async fn list(&self, scope: &TenantScope, limit: usize) -> Result<Vec<Appointment>> {
        self.check_failure()?;
        let mut rows: Vec<Appointment> = self
            .rows
            .lock()
            .iter()
            .filter(|row| scope.permits(row.organization_id))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.scheduled_at);
        rows.truncate(limit);
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Appointment>> {
        self.check_failure()?;
        Ok(self.rows.lock().iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, appointment: &Appointment) -> Result<Appointment> {
        self.check_failure()?;
        self.rows.lock().push(appointment.clone());
        Ok(appointment.clone())
    }

    async fn update(&self, id: Uuid, patch: &AppointmentPatch) -> Result<Appointment> {
        self.check_failure()?;
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| FrontdeskError::NotFound(format!("appointment {id}")))?;
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(notes) = &patch.notes {
            row.notes = Some(notes.clone());
        }
        if let Some(reminders) = &patch.reminders_sent {
            row.reminders_sent = reminders.clone();
        }
        if let Some(updated_at) = patch.updated_at {
            row.updated_at = updated_at;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.check_failure()?;
        self.rows.lock().retain(|row| row.id != id);
        Ok(())
    }
}

/// In-memory mock for `CallStore`.
#[derive(Default, Clone)]
pub struct MockCallStore {
    rows: Arc<Mutex<Vec<Call>>>,
}

impl MockCallStore {
    /// Create a mock seeded with the provided calls.
    pub fn new(rows: Vec<Call>) -> Self {
        Self { rows: Arc::new(Mutex::new(rows)) }
    }

    /// Raw snapshot for assertions.
    pub fn rows(&self) -> Vec<Call> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl CallStore for MockCallStore {
    async fn list(&self, scope: &TenantScope, limit: usize) -> Result<Vec<Call>> {
        let mut rows: Vec<Call> = self
            .rows
            .lock()
            .iter()
            .filter(|row| scope.permits(row.organization_id))
            .cloned()
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Call>> {
        Ok(self.rows.lock().iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, call: &Call) -> Result<Call> {
        self.rows.lock().push(call.clone());
        Ok(call.clone())
    }

    async fn update(&self, id: Uuid, patch: &CallPatch) -> Result<Call> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| FrontdeskError::NotFound(format!("call {id}")))?;
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(outcome) = &patch.outcome {
            row.outcome = Some(outcome.clone());
        }
        if let Some(ended_at) = patch.ended_at {
            row.ended_at = Some(ended_at);
        }
        if let Some(notes) = &patch.notes {
            row.notes = Some(notes.clone());
        }
        if let Some(updated_at) = patch.updated_at {
            row.updated_at = updated_at;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.lock().retain(|row| row.id != id);
        Ok(())
    }
}

/// In-memory mock for `ClientDirectory`.
#[derive(Default, Clone)]
pub struct MockClientDirectory {
    rows: Arc<Mutex<Vec<ClientRecord>>>,
}

impl MockClientDirectory {
    /// Create a mock seeded with the provided organizations.
    pub fn new(rows: Vec<ClientRecord>) -> Self {
        Self { rows: Arc::new(Mutex::new(rows)) }
    }
}

#[async_trait]
impl ClientDirectory for MockClientDirectory {
    async fn list(&self, scope: &TenantScope) -> Result<Vec<ClientRecord>> {
        Ok(self.rows.lock().iter().filter(|row| scope.permits(row.id)).cloned().collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ClientRecord>> {
        Ok(self.rows.lock().iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, client: &ClientRecord) -> Result<ClientRecord> {
        self.rows.lock().push(client.clone());
        Ok(client.clone())
    }

    async fn update(&self, id: Uuid, patch: &ClientPatch) -> Result<ClientRecord> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| FrontdeskError::NotFound(format!("client {id}")))?;
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(business_type) = &patch.business_type {
            row.business_type = Some(business_type.clone());
        }
        if let Some(contact_email) = &patch.contact_email {
            row.contact_email = Some(contact_email.clone());
        }
        if let Some(phone) = &patch.phone {
            row.phone = Some(phone.clone());
        }
        if let Some(active) = patch.is_active {
            row.is_active = active;
        }
        if let Some(updated_at) = patch.updated_at {
            row.updated_at = updated_at;
        }
        Ok(row.clone())
    }
}

/// In-memory mock for `UserDirectory`.
#[derive(Default, Clone)]
pub struct MockUserDirectory {
    rows: Arc<Mutex<Vec<UserProfile>>>,
}

impl MockUserDirectory {
    /// Create a mock seeded with the provided profiles.
    pub fn new(rows: Vec<UserProfile>) -> Self {
        Self { rows: Arc::new(Mutex::new(rows)) }
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn list(&self, scope: &TenantScope) -> Result<Vec<UserProfile>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|row| row.organization_id.map_or(scope.filter().is_none(), |org| scope.permits(org)))
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<UserProfile>> {
        Ok(self.rows.lock().iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile> {
        self.rows.lock().push(profile.clone());
        Ok(profile.clone())
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<UserProfile> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| FrontdeskError::NotFound(format!("user {id}")))?;
        row.role = role;
        Ok(row.clone())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<UserProfile> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| FrontdeskError::NotFound(format!("user {id}")))?;
        row.is_active = active;
        Ok(row.clone())
    }
}
