//! Authentication endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use frontdesk_domain::{AuthSession, FrontdeskError, UserProfile};
use serde::Deserialize;
use uuid::Uuid;

use super::identity::Caller;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

/// `POST /auth/sign-in`
pub async fn sign_in(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = context.auth.sign_in(&request.email, &request.password).await?;
    Ok(Json(session))
}

/// `POST /auth/sign-up`
pub async fn sign_up(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let profile = context
        .auth
        .sign_up(&request.email, &request.password, &request.full_name, request.organization_id)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `POST /auth/sign-out`
pub async fn sign_out(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| FrontdeskError::Auth("missing bearer token".to_string()))?;

    context.auth.sign_out(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/session` - the caller's resolved profile.
pub async fn session(caller: Caller) -> Json<UserProfile> {
    Json(caller.profile)
}
