//! Client-organization directory adapter over the hosted REST client

use std::sync::Arc;

use async_trait::async_trait;
use frontdesk_core::{ClientDirectory, TenantScope};
use frontdesk_domain::constants::TABLE_CLIENTS;
use frontdesk_domain::{ClientPatch, ClientRecord, Result};
use uuid::Uuid;

use super::client::{Filter, StoreClient};

/// [`ClientDirectory`] backed by the hosted store.
pub struct StoreClients {
    client: Arc<StoreClient>,
}

impl StoreClients {
    /// Wrap a shared store client.
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClientDirectory for StoreClients {
    async fn list(&self, scope: &TenantScope) -> Result<Vec<ClientRecord>> {
        // An organization record's own id is its tenant key.
        let filters: Vec<Filter> =
            scope.filter().map(|org| Filter::eq("id", org)).into_iter().collect();
        self.client.select(TABLE_CLIENTS, &filters, Some("name.asc"), None).await
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ClientRecord>> {
        self.client.select_one(TABLE_CLIENTS, &[Filter::eq("id", id)]).await
    }

    async fn insert(&self, client: &ClientRecord) -> Result<ClientRecord> {
        self.client.insert(TABLE_CLIENTS, client).await
    }

    async fn update(&self, id: Uuid, patch: &ClientPatch) -> Result<ClientRecord> {
        self.client.update(TABLE_CLIENTS, id, patch).await
    }
}
