//! Port interfaces for client organization records

use async_trait::async_trait;
use frontdesk_domain::{ClientPatch, ClientRecord, Result};
use uuid::Uuid;

use crate::policy::TenantScope;

/// Persistence port for client organizations.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// List organizations visible in `scope` (a scoped caller sees only its
    /// own record).
    async fn list(&self, scope: &TenantScope) -> Result<Vec<ClientRecord>>;

    /// Fetch one organization by id, unscoped.
    async fn fetch(&self, id: Uuid) -> Result<Option<ClientRecord>>;

    /// Insert a new organization, returning the stored row.
    async fn insert(&self, client: &ClientRecord) -> Result<ClientRecord>;

    /// Apply a partial update by id, returning the updated row.
    async fn update(&self, id: Uuid, patch: &ClientPatch) -> Result<ClientRecord>;
}
