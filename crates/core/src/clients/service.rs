//! Client organization service
//!
//! Onboarding and deactivation are reserved for the elevated role; a scoped
//! org admin may edit its own organization's details.

use std::sync::Arc;

use chrono::Utc;
use frontdesk_domain::{ClientDraft, ClientPatch, ClientRecord, FrontdeskError, Result};
use tracing::info;
use uuid::Uuid;

use super::ports::ClientDirectory;
use crate::policy::TenantScope;

/// Client organization operations.
pub struct ClientService {
    directory: Arc<dyn ClientDirectory>,
}

impl ClientService {
    /// Create a new client service over a directory port.
    pub fn new(directory: Arc<dyn ClientDirectory>) -> Self {
        Self { directory }
    }

    /// Organizations visible to the caller.
    pub async fn list(&self, scope: &TenantScope) -> Result<Vec<ClientRecord>> {
        self.directory.list(scope).await
    }

    /// Onboard a new client organization (elevated callers only).
    pub async fn create(&self, scope: &TenantScope, draft: ClientDraft) -> Result<ClientRecord> {
        if scope.filter().is_some() {
            return Err(FrontdeskError::PermissionDenied(
                "only an elevated caller may onboard organizations".to_string(),
            ));
        }

        let now = Utc::now();
        let client = ClientRecord {
            id: Uuid::new_v4(),
            name: draft.name,
            business_type: draft.business_type,
            contact_email: draft.contact_email,
            phone: draft.phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let stored = self.directory.insert(&client).await?;
        info!(client_id = %stored.id, "client organization onboarded");
        Ok(stored)
    }

    /// Update an organization's details.
    pub async fn update(
        &self,
        scope: &TenantScope,
        id: Uuid,
        mut patch: ClientPatch,
    ) -> Result<ClientRecord> {
        self.load_guarded(scope, id).await?;
        // Activation changes stay with the elevated role.
        if patch.is_active.is_some() && scope.filter().is_some() {
            return Err(FrontdeskError::PermissionDenied(
                "only an elevated caller may change an organization's active state".to_string(),
            ));
        }
        patch.updated_at = Some(Utc::now());
        let updated = self.directory.update(id, &patch).await?;
        info!(client_id = %id, "client organization updated");
        Ok(updated)
    }

    /// Deactivate an organization (elevated callers only).
    pub async fn deactivate(&self, scope: &TenantScope, id: Uuid) -> Result<ClientRecord> {
        if scope.filter().is_some() {
            return Err(FrontdeskError::PermissionDenied(
                "only an elevated caller may deactivate organizations".to_string(),
            ));
        }
        self.load_guarded(scope, id).await?;
        let patch = ClientPatch {
            is_active: Some(false),
            updated_at: Some(Utc::now()),
            ..ClientPatch::default()
        };
        let updated = self.directory.update(id, &patch).await?;
        info!(client_id = %id, "client organization deactivated");
        Ok(updated)
    }

    async fn load_guarded(&self, scope: &TenantScope, id: Uuid) -> Result<ClientRecord> {
        let client = self
            .directory
            .fetch(id)
            .await?
            .ok_or_else(|| FrontdeskError::NotFound(format!("client {id}")))?;
        // The organization record's own id is its tenant key.
        scope.ensure_permits(client.id)?;
        Ok(client)
    }
}
