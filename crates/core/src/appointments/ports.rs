//! Port interfaces for appointment persistence
//!
//! These traits define the boundary between core business logic and the
//! hosted-store adapter.

use async_trait::async_trait;
use frontdesk_domain::{Appointment, AppointmentPatch, Result};
use uuid::Uuid;

use crate::policy::TenantScope;

/// Persistence port for appointments.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// List appointments visible in `scope`, ordered ascending by scheduled
    /// time, up to `limit` rows.
    async fn list(&self, scope: &TenantScope, limit: usize) -> Result<Vec<Appointment>>;

    /// Fetch a single appointment by id, unscoped.
    ///
    /// Callers are responsible for guarding the result against the caller's
    /// scope; the unscoped read is what lets the guard distinguish a
    /// permission error from a missing record.
    async fn fetch(&self, id: Uuid) -> Result<Option<Appointment>>;

    /// Insert a fully formed appointment, returning the stored row.
    async fn insert(&self, appointment: &Appointment) -> Result<Appointment>;

    /// Apply a partial update by id, returning the updated row.
    async fn update(&self, id: Uuid, patch: &AppointmentPatch) -> Result<Appointment>;

    /// Delete by id.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
