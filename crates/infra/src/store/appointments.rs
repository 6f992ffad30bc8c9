//! Appointment store adapter over the hosted REST client

use std::sync::Arc;

use async_trait::async_trait;
use frontdesk_core::{AppointmentStore, TenantScope};
use frontdesk_domain::constants::{TABLE_APPOINTMENTS, TENANT_COLUMN};
use frontdesk_domain::{Appointment, AppointmentPatch, Result};
use uuid::Uuid;

use super::client::{Filter, StoreClient};

/// [`AppointmentStore`] backed by the hosted store.
pub struct StoreAppointments {
    client: Arc<StoreClient>,
}

impl StoreAppointments {
    /// Wrap a shared store client.
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }

    fn scope_filters(scope: &TenantScope) -> Vec<Filter> {
        scope.filter().map(|org| Filter::eq(TENANT_COLUMN, org)).into_iter().collect()
    }
}

#[async_trait]
impl AppointmentStore for StoreAppointments {
    async fn list(&self, scope: &TenantScope, limit: usize) -> Result<Vec<Appointment>> {
        self.client
            .select(
                TABLE_APPOINTMENTS,
                &Self::scope_filters(scope),
                Some("scheduled_at.asc"),
                Some(limit),
            )
            .await
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Appointment>> {
        self.client.select_one(TABLE_APPOINTMENTS, &[Filter::eq("id", id)]).await
    }

    async fn insert(&self, appointment: &Appointment) -> Result<Appointment> {
        self.client.insert(TABLE_APPOINTMENTS, appointment).await
    }

    async fn update(&self, id: Uuid, patch: &AppointmentPatch) -> Result<Appointment> {
        self.client.update(TABLE_APPOINTMENTS, id, patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete(TABLE_APPOINTMENTS, id).await
    }
}
