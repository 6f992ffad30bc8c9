//! User administration service

use std::sync::Arc;

use frontdesk_domain::{FrontdeskError, Result, UserProfile, UserRole};
use tracing::info;
use uuid::Uuid;

use super::ports::UserDirectory;
use crate::policy::TenantScope;

/// Staff account operations.
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
}

impl UserService {
    /// Create a new user service over a directory port.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Profiles visible to the caller.
    pub async fn list(&self, scope: &TenantScope) -> Result<Vec<UserProfile>> {
        self.directory.list(scope).await
    }

    /// Change a staff account's role.
    ///
    /// Only admins may assign roles, and the elevated role can only be
    /// granted by a caller who already holds it.
    pub async fn set_role(
        &self,
        scope: &TenantScope,
        caller_role: UserRole,
        id: Uuid,
        role: UserRole,
    ) -> Result<UserProfile> {
        if !caller_role.is_admin() {
            return Err(FrontdeskError::PermissionDenied(
                "only administrators may change roles".to_string(),
            ));
        }
        if role.is_elevated() && !caller_role.is_elevated() {
            return Err(FrontdeskError::PermissionDenied(
                "only an elevated caller may grant the elevated role".to_string(),
            ));
        }
        self.load_guarded(scope, id).await?;

        let updated = self.directory.set_role(id, role).await?;
        info!(user_id = %id, role = role.as_str(), "user role changed");
        Ok(updated)
    }

    /// Activate or deactivate a staff account.
    pub async fn set_active(
        &self,
        scope: &TenantScope,
        caller_role: UserRole,
        id: Uuid,
        active: bool,
    ) -> Result<UserProfile> {
        if !caller_role.is_admin() {
            return Err(FrontdeskError::PermissionDenied(
                "only administrators may change account state".to_string(),
            ));
        }
        self.load_guarded(scope, id).await?;

        let updated = self.directory.set_active(id, active).await?;
        info!(user_id = %id, active, "user account state changed");
        Ok(updated)
    }

    async fn load_guarded(&self, scope: &TenantScope, id: Uuid) -> Result<UserProfile> {
        let profile = self
            .directory
            .fetch(id)
            .await?
            .ok_or_else(|| FrontdeskError::NotFound(format!("user {id}")))?;
        // Profiles without an organization are only administrable by the
        // elevated role.
        match profile.organization_id {
            Some(org) => scope.ensure_permits(org)?,
            None => {
                if scope.filter().is_some() {
                    return Err(FrontdeskError::PermissionDenied(
                        "profile is outside the caller's organization".to_string(),
                    ));
                }
            }
        }
        Ok(profile)
    }
}
