//! # Error Responses
//!
//! [`AppError`] is what every handler returns on failure. It renders as
//!
//! ```json
//! {"error": {"code": "PAUSED", "message": "credential issuance is paused"}}
//! ```
//!
//! Ledger rejections keep the ledger's own code (`CredentialError::kind`).
//! Fatal ledger errors are logged and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use sbt_state::CredentialError;

/// JSON envelope of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Code and message of a failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `SOULBOUND_VIOLATION`.
    pub code: String,
    pub message: String,
}

/// Failure of an HTTP request.
#[derive(Error, Debug)]
pub enum AppError {
    /// 422: a path or body field failed to parse.
    #[error("validation error: {0}")]
    Validation(String),

    /// 400: the body is not the expected JSON shape.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 401: no usable caller identity.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 500. Only the log sees the message.
    #[error("internal error: {0}")]
    Internal(String),

    /// The ledger rejected the call.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl AppError {
    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Credential(err) => match err {
                CredentialError::PermissionDenied { .. }
                | CredentialError::SoulboundViolation { .. } => StatusCode::FORBIDDEN,
                CredentialError::InvalidState { .. } | CredentialError::Paused => {
                    StatusCode::CONFLICT
                }
                CredentialError::LengthMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CredentialError::NotFound(_) => StatusCode::NOT_FOUND,
                CredentialError::DuplicateId(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Machine-readable code of the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Credential(err) => err.kind(),
        }
    }

    fn is_internal(&self) -> bool {
        match self {
            Self::Internal(_) => true,
            Self::Credential(err) => err.is_fatal(),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_internal() {
            tracing::error!(code = self.code(), error = %self, "request failed on an internal error");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };
        let detail = ErrorDetail {
            code: self.code().to_string(),
            message,
        };
        (self.status(), Json(ErrorBody { error: detail })).into_response()
    }
}

impl From<sbt_core::ValidationError> for AppError {
    fn from(err: sbt_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<sbt_core::CanonicalizationError> for AppError {
    fn from(err: sbt_core::CanonicalizationError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use sbt_core::{AccountId, CredentialId};

    fn parts(err: &AppError) -> (StatusCode, &'static str) {
        (err.status(), err.code())
    }

    fn status_of(err: CredentialError) -> (StatusCode, &'static str) {
        parts(&AppError::from(err))
    }

    #[test]
    fn credential_error_status_mapping() {
        assert_eq!(
            status_of(CredentialError::PermissionDenied {
                account: AccountId::ZERO,
                reason: "missing MINTER_ROLE".into(),
            }),
            (StatusCode::FORBIDDEN, "PERMISSION_DENIED")
        );
        assert_eq!(
            status_of(CredentialError::SoulboundViolation { operation: "transfer" }),
            (StatusCode::FORBIDDEN, "SOULBOUND_VIOLATION")
        );
        assert_eq!(
            status_of(CredentialError::InvalidState {
                operation: "pause",
                state: "PAUSED".into(),
            }),
            (StatusCode::CONFLICT, "INVALID_STATE")
        );
        assert_eq!(
            status_of(CredentialError::Paused),
            (StatusCode::CONFLICT, "PAUSED")
        );
        assert_eq!(
            status_of(CredentialError::LengthMismatch { recipients: 1, uris: 2 }),
            (StatusCode::UNPROCESSABLE_ENTITY, "LENGTH_MISMATCH")
        );
        assert_eq!(
            status_of(CredentialError::NotFound(CredentialId::new(7))),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
        assert_eq!(
            status_of(CredentialError::DuplicateId(CredentialId::new(7))),
            (StatusCode::INTERNAL_SERVER_ERROR, "DUPLICATE_ID")
        );
    }

    #[test]
    fn plain_variants_status_mapping() {
        assert_eq!(
            parts(&AppError::BadRequest("x".into())),
            (StatusCode::BAD_REQUEST, "BAD_REQUEST")
        );
        assert_eq!(
            parts(&AppError::Unauthorized("x".into())),
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        );
        assert_eq!(
            parts(&AppError::Validation("x".into())),
            (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
        );
    }

    #[tokio::test]
    async fn fatal_error_message_hidden() {
        let response =
            AppError::from(CredentialError::DuplicateId(CredentialId::new(3))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "DUPLICATE_ID");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn client_error_message_exposed() {
        let response = AppError::from(CredentialError::Paused).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "credential issuance is paused");
    }

    #[test]
    fn validation_error_converts() {
        let err = "nope".parse::<AccountId>().unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }
}
