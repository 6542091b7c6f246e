//! HTTP error mapping.
//!
//! Every failure leaves the service as a status code plus a `{"detail": ...}`
//! body; 401s additionally carry a `WWW-Authenticate` challenge.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use snapsight_core::SnapsightError;

/// An HTTP-facing error: status code plus a human-readable detail message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.detail }));
        if self.status == StatusCode::UNAUTHORIZED {
            (self.status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (self.status, body).into_response()
        }
    }
}

impl From<SnapsightError> for ApiError {
    fn from(err: SnapsightError) -> Self {
        match err {
            SnapsightError::Provider { .. } => Self::bad_gateway(err.to_string()),
            SnapsightError::InvalidRequest(msg) => Self::bad_request(msg),
            SnapsightError::Config(msg) => Self::internal(format!("Server misconfigured: {msg}")),
            SnapsightError::Other(e) => {
                error!(error = %e, "Unhandled analysis failure");
                Self::internal(format!("Server error: {e}"))
            }
        }
    }
}
