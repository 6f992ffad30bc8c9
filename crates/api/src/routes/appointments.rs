//! Appointment endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use frontdesk_domain::{
    Appointment, AppointmentDraft, AppointmentStats, AppointmentStatus, FieldError,
    FrontdeskError, ValidationErrors,
};
use serde::Deserialize;
use uuid::Uuid;

use super::identity::Caller;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(flatten)]
    pub draft: AppointmentDraft,
    /// Target organization; required for elevated callers, rejected when it
    /// names a foreign organization for scoped ones.
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `GET /appointments`
pub async fn list(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointments = context.appointments.list(&caller.scope).await?;
    Ok(Json(appointments))
}

/// `GET /appointments/stats`
pub async fn stats(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
) -> Result<Json<AppointmentStats>, ApiError> {
    let stats = context.appointments.stats(&caller.scope).await?;
    Ok(Json(stats))
}

/// `POST /appointments`
pub async fn create(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appointment = context
        .appointments
        .create(&caller.scope, request.organization_id, request.draft)
        .await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// `POST /appointments/{id}/status`
pub async fn update_status(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Appointment>, ApiError> {
    // Write-side parsing is strict: an unknown status is the caller's bug,
    // not something to paper over with the read-side fallback.
    let status = AppointmentStatus::parse(&request.status).ok_or_else(|| {
        FrontdeskError::Validation(ValidationErrors::from(vec![FieldError::new(
            "status",
            format!("unknown appointment status `{}`", request.status),
        )]))
    })?;

    let appointment =
        context.appointments.update_status(&caller.scope, id, status, request.notes).await?;
    Ok(Json(appointment))
}

/// `POST /appointments/{id}/reminder`
pub async fn send_reminder(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = context.appointments.send_reminder(&caller.scope, id).await?;
    Ok(Json(appointment))
}

/// `DELETE /appointments/{id}`
pub async fn remove(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    context.appointments.delete(&caller.scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
