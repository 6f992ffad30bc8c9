//! HTTP error mapping
//!
//! Every handler returns `Result<_, ApiError>`; the mapping keeps the
//! domain taxonomy visible to clients: tenant violations are 403s, not
//! generic 500s, and validation failures carry their field errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use frontdesk_domain::FrontdeskError;
use serde_json::json;

/// Wrapper turning a domain error into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub FrontdeskError);

impl From<FrontdeskError> for ApiError {
    fn from(err: FrontdeskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FrontdeskError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FrontdeskError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            FrontdeskError::Auth(_) => StatusCode::UNAUTHORIZED,
            FrontdeskError::NotFound(_) => StatusCode::NOT_FOUND,
            FrontdeskError::Network(_) | FrontdeskError::Store(_) => StatusCode::BAD_GATEWAY,
            FrontdeskError::Config(_) | FrontdeskError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, label = self.0.label(), "request failed");
        } else {
            tracing::debug!(error = %self.0, label = self.0.label(), "request rejected");
        }

        let body = match &self.0 {
            FrontdeskError::Validation(errors) => json!({
                "error": self.0.label(),
                "message": self.0.to_string(),
                "fields": errors.errors(),
            }),
            other => json!({
                "error": other.label(),
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
