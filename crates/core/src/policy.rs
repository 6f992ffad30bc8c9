//! Centralized tenant policy
//!
//! Every data-access path derives a [`TenantScope`] from the caller's profile
//! and consults it for reads and writes alike. The branching used to be
//! re-implemented in every hook; it lives here exactly once.

use frontdesk_domain::{FrontdeskError, Result, UserProfile, UserRole};
use uuid::Uuid;

/// Visibility scope of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Elevated role: no organization filter is applied.
    All,
    /// Scoped role: reads and writes are constrained to this organization.
    Org(Uuid),
}

impl TenantScope {
    /// Derive the scope for a caller.
    ///
    /// A non-elevated profile without an organization cannot access tenant
    /// data at all; that is a permission error, not an empty scope.
    pub fn for_profile(profile: &UserProfile) -> Result<Self> {
        if profile.role.is_elevated() {
            return Ok(Self::All);
        }
        match profile.organization_id {
            Some(org) => Ok(Self::Org(org)),
            None => Err(FrontdeskError::PermissionDenied(
                "profile has no organization assigned".to_string(),
            )),
        }
    }

    /// Scope fixed to a single organization.
    pub fn org(id: Uuid) -> Self {
        Self::Org(id)
    }

    /// Organization filter to apply to store queries, if any.
    pub fn filter(&self) -> Option<Uuid> {
        match self {
            Self::All => None,
            Self::Org(id) => Some(*id),
        }
    }

    /// Whether a record owned by `organization_id` is visible in this scope.
    pub fn permits(&self, organization_id: Uuid) -> bool {
        match self {
            Self::All => true,
            Self::Org(own) => *own == organization_id,
        }
    }

    /// Guard a mutation against a record's owning organization.
    pub fn ensure_permits(&self, organization_id: Uuid) -> Result<()> {
        if self.permits(organization_id) {
            return Ok(());
        }
        Err(FrontdeskError::PermissionDenied(
            "record belongs to another organization".to_string(),
        ))
    }

    /// Organization new records are created under.
    ///
    /// An elevated caller must name a target organization explicitly; scoped
    /// callers always create within their own.
    pub fn creation_org(&self, requested: Option<Uuid>) -> Result<Uuid> {
        match (self, requested) {
            (Self::Org(own), None) => Ok(*own),
            (Self::Org(own), Some(explicit)) => {
                if explicit == *own {
                    Ok(*own)
                } else {
                    Err(FrontdeskError::PermissionDenied(
                        "cannot create records for another organization".to_string(),
                    ))
                }
            }
            (Self::All, Some(explicit)) => Ok(explicit),
            (Self::All, None) => Err(FrontdeskError::Validation(
                frontdesk_domain::ValidationErrors::from(vec![
                    frontdesk_domain::FieldError::new(
                        "organization_id",
                        "an elevated caller must name the target organization",
                    ),
                ]),
            )),
        }
    }
}
