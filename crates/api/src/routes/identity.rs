//! Caller identity extraction
//!
//! Resolves the bearer token to a profile once per request; handlers get a
//! ready-made [`TenantScope`] so the policy is applied uniformly.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use frontdesk_core::TenantScope;
use frontdesk_domain::{FrontdeskError, UserProfile};

use crate::context::AppContext;
use crate::error::ApiError;

/// Authenticated caller: profile plus derived tenant scope.
pub struct Caller {
    pub profile: UserProfile,
    pub scope: TenantScope,
}

impl FromRequestParts<Arc<AppContext>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| FrontdeskError::Auth("missing bearer token".to_string()))?;

        let profile = state.auth.profile_for_token(&token).await?;
        if !profile.is_active {
            return Err(ApiError(FrontdeskError::Auth("account is deactivated".to_string())));
        }

        let scope = TenantScope::for_profile(&profile)?;
        Ok(Self { profile, scope })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
