//! Port interfaces for user profile management
//!
//! These traits define the boundaries between core business logic and
//! infrastructure implementations for user profile operations.

use async_trait::async_trait;
use frontdesk_domain::{Result, UserProfile, UserRole};
use uuid::Uuid;

use crate::policy::TenantScope;

/// Persistence port for staff profiles.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// List profiles visible in `scope`.
    async fn list(&self, scope: &TenantScope) -> Result<Vec<UserProfile>>;

    /// Fetch one profile by user id, unscoped.
    async fn fetch(&self, id: Uuid) -> Result<Option<UserProfile>>;

    /// Create a profile row (used at sign-up and for bootstrap).
    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile>;

    /// Replace a profile's role.
    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<UserProfile>;

    /// Activate or deactivate a profile.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<UserProfile>;
}
