//! User profiles and sessions
//!
//! Profiles live in the backend store keyed by the auth user id; the session
//! comes from the hosted auth service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a staff account.
///
/// `SuperAdmin` is the single elevated role permitted to bypass per-tenant
/// filtering; every other role is scoped to its organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    OrgAdmin,
    Agent,
    User,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::OrgAdmin => "org_admin",
            Self::Agent => "agent",
            Self::User => "user",
        }
    }

    /// Whether this role sees every organization.
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Whether this role may administer users within its scope.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::OrgAdmin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

/// Profile record for a staff account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    /// Owning tenant; absent only for freshly bootstrapped profiles and for
    /// elevated accounts.
    pub organization_id: Option<Uuid>,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Authenticated session handed back by the hosted auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires.
    pub expires_in: Option<u64>,
    pub user_id: Uuid,
}
