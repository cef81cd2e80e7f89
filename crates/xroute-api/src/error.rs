//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`ServiceError`] to HTTP status codes and a JSON body carrying a
//! machine-readable code and a message. Internal details never reach the
//! client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use xroute_policy::ServiceError;

/// JSON body of every error response: `{"error": {"code", "message"}}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Code and message for one failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable code, one of `BAD_REQUEST`, `NOT_FOUND`, `INTERNAL_ERROR`,
    /// `SERVICE_UNAVAILABLE` or `TIMEOUT`.
    pub code: String,
    pub message: String,
}

/// Request-layer failure, rendered as an [`ErrorBody`].
#[derive(Error, Debug)]
pub enum AppError {
    /// 400. Bad body, identifier, chain reference or field value, or a
    /// request the execution layer refused.
    #[error("{0}")]
    BadRequest(String),

    /// 404.
    #[error("{0}")]
    NotFound(String),

    /// 500. Logged; the client sees a generic message.
    #[error("internal error: {0}")]
    Internal(String),

    /// 503. No execution layer, or the request was cancelled by shutdown.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 504. The request context deadline passed.
    #[error("timeout: {0}")]
    Timeout(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed with an internal error");
                "An internal error occurred".to_string()
            }
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let error = ErrorDetail {
            code: code.to_string(),
            message: self.client_message(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(msg) => Self::BadRequest(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Internal(msg) => Self::Internal(msg),
            ServiceError::Cancelled => Self::ServiceUnavailable("request cancelled".into()),
            ServiceError::DeadlineExceeded => Self::Timeout("request deadline exceeded".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Cancelled, StatusCode::SERVICE_UNAVAILABLE),
            (ServiceError::DeadlineExceeded, StatusCode::GATEWAY_TIMEOUT),
        ];
        for (err, expected) in cases {
            let (status, _) = AppError::from(err).status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn bad_request_message_is_passed_through() {
        let (status, body) =
            response_parts(AppError::BadRequest("peerHex: expected 32 bytes".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "BAD_REQUEST");
        assert_eq!(body.error.message, "peerHex: expected 32 bytes");
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("pool timed out".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(
            !body.error.message.contains("pool"),
            "internal error details must not leak: {}",
            body.error.message
        );
    }

    #[tokio::test]
    async fn timeout_body_has_code() {
        let (status, body) = response_parts(ServiceError::DeadlineExceeded.into()).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body.error.code, "TIMEOUT");
    }
}
