//! Conversions from external infrastructure errors into domain errors.

use frontdesk_domain::FrontdeskError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FrontdeskError);

impl From<InfraError> for FrontdeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FrontdeskError> for InfraError {
    fn from(value: FrontdeskError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FrontdeskError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let message = err.to_string();
        let mapped = if err.is_timeout() {
            FrontdeskError::Network(format!("http request timed out: {message}"))
        } else if err.is_connect() {
            FrontdeskError::Network(format!("http connection failed: {message}"))
        } else if err.is_decode() {
            FrontdeskError::Store(format!("undecodable store response: {message}"))
        } else if err.is_builder() {
            FrontdeskError::Internal(format!("malformed http request: {message}"))
        } else {
            FrontdeskError::Network(format!("http request failed: {message}"))
        };
        InfraError(mapped)
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → FrontdeskError */
/* -------------------------------------------------------------------------- */

impl From<url::ParseError> for InfraError {
    fn from(err: url::ParseError) -> Self {
        InfraError(FrontdeskError::Config(format!("invalid endpoint url: {err}")))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → FrontdeskError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        InfraError(FrontdeskError::Store(format!("undecodable store payload: {err}")))
    }
}

/// Map an HTTP response status onto the domain taxonomy.
///
/// The permission mapping is what keeps tenant violations surfaced distinctly
/// from generic backend failures all the way up the stack.
pub(crate) fn error_for_status(status: reqwest::StatusCode, body: &str) -> FrontdeskError {
    use reqwest::StatusCode;

    let detail = if body.is_empty() { status.to_string() } else { body.to_string() };
    match status {
        StatusCode::UNAUTHORIZED => FrontdeskError::Auth(detail),
        StatusCode::FORBIDDEN => FrontdeskError::PermissionDenied(detail),
        StatusCode::NOT_FOUND => FrontdeskError::NotFound(detail),
        status if status.is_server_error() => {
            FrontdeskError::Network(format!("store unavailable: {detail}"))
        }
        _ => FrontdeskError::Store(detail),
    }
}
