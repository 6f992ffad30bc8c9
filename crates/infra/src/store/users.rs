//! User profile directory adapter over the hosted REST client

use std::sync::Arc;

use async_trait::async_trait;
use frontdesk_core::{TenantScope, UserDirectory};
use frontdesk_domain::constants::{TABLE_USER_PROFILES, TENANT_COLUMN};
use frontdesk_domain::{Result, UserProfile, UserRole};
use uuid::Uuid;

use super::client::{Filter, StoreClient};

/// [`UserDirectory`] backed by the hosted store.
pub struct StoreUsers {
    client: Arc<StoreClient>,
}

impl StoreUsers {
    /// Wrap a shared store client.
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserDirectory for StoreUsers {
    async fn list(&self, scope: &TenantScope) -> Result<Vec<UserProfile>> {
        let filters: Vec<Filter> =
            scope.filter().map(|org| Filter::eq(TENANT_COLUMN, org)).into_iter().collect();
        self.client.select(TABLE_USER_PROFILES, &filters, Some("email.asc"), None).await
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<UserProfile>> {
        self.client.select_one(TABLE_USER_PROFILES, &[Filter::eq("id", id)]).await
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile> {
        self.client.insert(TABLE_USER_PROFILES, profile).await
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<UserProfile> {
        self.client
            .update(TABLE_USER_PROFILES, id, &serde_json::json!({ "role": role.as_str() }))
            .await
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<UserProfile> {
        self.client
            .update(TABLE_USER_PROFILES, id, &serde_json::json!({ "is_active": active }))
            .await
    }
}
