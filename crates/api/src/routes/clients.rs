//! Client organization endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use frontdesk_domain::{ClientDraft, ClientPatch, ClientRecord};
use uuid::Uuid;

use super::identity::Caller;
use crate::context::AppContext;
use crate::error::ApiError;

/// `GET /clients`
pub async fn list(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
) -> Result<Json<Vec<ClientRecord>>, ApiError> {
    let clients = context.clients.list(&caller.scope).await?;
    Ok(Json(clients))
}

/// `POST /clients`
pub async fn create(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Json(draft): Json<ClientDraft>,
) -> Result<(StatusCode, Json<ClientRecord>), ApiError> {
    let client = context.clients.create(&caller.scope, draft).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// `PATCH /clients/{id}`
pub async fn update(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(patch): Json<ClientPatchRequest>,
) -> Result<Json<ClientRecord>, ApiError> {
    let client = context.clients.update(&caller.scope, id, patch.into_patch()).await?;
    Ok(Json(client))
}

/// `POST /clients/{id}/deactivate`
pub async fn deactivate(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientRecord>, ApiError> {
    let client = context.clients.deactivate(&caller.scope, id).await?;
    Ok(Json(client))
}

/// Incoming patch body; `updated_at` is always stamped server-side.
#[derive(Debug, serde::Deserialize)]
pub struct ClientPatchRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ClientPatchRequest {
    fn into_patch(self) -> ClientPatch {
        ClientPatch {
            name: self.name,
            business_type: self.business_type,
            contact_email: self.contact_email,
            phone: self.phone,
            is_active: self.is_active,
            updated_at: None,
        }
    }
}
