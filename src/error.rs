/*
 * Responsibility
 * - アプリ共通の ApiError 定義
 * - IntoResponse 実装 ({success:false, error, message} envelope)
 * - RepoError / AuthError を統一的に変換 (種別→HTTP status の集約はここだけ)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

/// Every failure leaves the process as this envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,

    #[error("resource not found")]
    NotFound,

    #[error("unprocessable")]
    Unprocessable,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            // The precise kind survives into the message; the status collapses
            // to 401 (credential/infrastructure problem) or 403 (valid token,
            // insufficient grant).
            ApiError::Auth(e) => (auth_status(e), e.to_string()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = ErrorEnvelope {
            success: false,
            error: status.as_u16(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

fn auth_status(e: &AuthError) -> StatusCode {
    match e {
        AuthError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
        _ => StatusCode::UNAUTHORIZED,
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "repo failure");
        ApiError::Internal
    }
}
