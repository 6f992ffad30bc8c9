//! Port interfaces for call persistence

use async_trait::async_trait;
use frontdesk_domain::{Call, CallPatch, Result};
use uuid::Uuid;

use crate::policy::TenantScope;

/// Persistence port for call records.
#[async_trait]
pub trait CallStore: Send + Sync {
    /// List calls visible in `scope`, newest first, up to `limit` rows.
    async fn list(&self, scope: &TenantScope, limit: usize) -> Result<Vec<Call>>;

    /// Fetch a single call by id, unscoped (callers guard the result).
    async fn fetch(&self, id: Uuid) -> Result<Option<Call>>;

    /// Insert a fully formed call record, returning the stored row.
    async fn insert(&self, call: &Call) -> Result<Call>;

    /// Apply a partial update by id, returning the updated row.
    async fn update(&self, id: Uuid, patch: &CallPatch) -> Result<Call>;

    /// Delete by id.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
