//! Call endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use frontdesk_domain::{
    Call, CallDraft, CallStats, CallStatus, FieldError, FrontdeskError, ValidationErrors,
};
use serde::Deserialize;
use uuid::Uuid;

use super::identity::Caller;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateCallRequest {
    #[serde(flatten)]
    pub draft: CallDraft,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CallStatusRequest {
    pub status: String,
    #[serde(default)]
    pub outcome: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub reason: String,
}

/// `GET /calls`
pub async fn list(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
) -> Result<Json<Vec<Call>>, ApiError> {
    let calls = context.calls.list(&caller.scope).await?;
    Ok(Json(calls))
}

/// `GET /calls/stats`
pub async fn stats(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
) -> Result<Json<CallStats>, ApiError> {
    let stats = context.calls.stats(&caller.scope).await?;
    Ok(Json(stats))
}

/// `POST /calls`
pub async fn create(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Json(request): Json<CreateCallRequest>,
) -> Result<(StatusCode, Json<Call>), ApiError> {
    let call =
        context.calls.log_call(&caller.scope, request.organization_id, request.draft).await?;
    Ok((StatusCode::CREATED, Json(call)))
}

/// `POST /calls/{id}/status`
pub async fn update_status(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<CallStatusRequest>,
) -> Result<Json<Call>, ApiError> {
    let status = CallStatus::parse(&request.status).ok_or_else(|| {
        FrontdeskError::Validation(ValidationErrors::from(vec![FieldError::new(
            "status",
            format!("unknown call status `{}`", request.status),
        )]))
    })?;

    let call = context.calls.update_status(&caller.scope, id, status, request.outcome).await?;
    Ok(Json(call))
}

/// `POST /calls/{id}/transfer`
pub async fn transfer(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<Call>, ApiError> {
    let call = context.calls.transfer(&caller.scope, id, &request.reason).await?;
    Ok(Json(call))
}

/// `DELETE /calls/{id}`
pub async fn remove(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    context.calls.delete(&caller.scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
