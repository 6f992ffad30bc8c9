//! Staff account endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use frontdesk_domain::{FieldError, FrontdeskError, UserProfile, UserRole, ValidationErrors};
use serde::Deserialize;
use uuid::Uuid;

use super::identity::Caller;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveRequest {
    pub active: bool,
}

/// `GET /users`
pub async fn list(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let users = context.users.list(&caller.scope).await?;
    Ok(Json(users))
}

/// `POST /users/{id}/role`
pub async fn set_role(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<RoleRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let role = parse_role(&request.role)?;
    let profile =
        context.users.set_role(&caller.scope, caller.profile.role, id, role).await?;
    Ok(Json(profile))
}

/// `POST /users/{id}/active`
pub async fn set_active(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<ActiveRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = context
        .users
        .set_active(&caller.scope, caller.profile.role, id, request.active)
        .await?;
    Ok(Json(profile))
}

fn parse_role(raw: &str) -> Result<UserRole, FrontdeskError> {
    match raw {
        "super_admin" => Ok(UserRole::SuperAdmin),
        "org_admin" => Ok(UserRole::OrgAdmin),
        "agent" => Ok(UserRole::Agent),
        "user" => Ok(UserRole::User),
        other => Err(FrontdeskError::Validation(ValidationErrors::from(vec![FieldError::new(
            "role",
            format!("unknown role `{other}`"),
        )]))),
    }
}
