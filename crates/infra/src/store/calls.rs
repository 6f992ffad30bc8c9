//! Call store adapter over the hosted REST client

use std::sync::Arc;

use async_trait::async_trait;
use frontdesk_core::{CallStore, TenantScope};
use frontdesk_domain::constants::{TABLE_CALLS, TENANT_COLUMN};
use frontdesk_domain::{Call, CallPatch, Result};
use uuid::Uuid;

use super::client::{Filter, StoreClient};

/// [`CallStore`] backed by the hosted store.
pub struct StoreCalls {
    client: Arc<StoreClient>,
}

impl StoreCalls {
    /// Wrap a shared store client.
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }

    fn scope_filters(scope: &TenantScope) -> Vec<Filter> {
        scope.filter().map(|org| Filter::eq(TENANT_COLUMN, org)).into_iter().collect()
    }
}

#[async_trait]
impl CallStore for StoreCalls {
    async fn list(&self, scope: &TenantScope, limit: usize) -> Result<Vec<Call>> {
        self.client
            .select(TABLE_CALLS, &Self::scope_filters(scope), Some("created_at.desc"), Some(limit))
            .await
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Call>> {
        self.client.select_one(TABLE_CALLS, &[Filter::eq("id", id)]).await
    }

    async fn insert(&self, call: &Call) -> Result<Call> {
        self.client.insert(TABLE_CALLS, call).await
    }

    async fn update(&self, id: Uuid, patch: &CallPatch) -> Result<Call> {
        self.client.update(TABLE_CALLS, id, patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete(TABLE_CALLS, id).await
    }
}
