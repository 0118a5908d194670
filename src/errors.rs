use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("workspace not found")]
    WorkspaceNotFound,

    #[error("token not found")]
    TokenNotFound,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::UserNotFound | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::WorkspaceNotFound | AppError::TokenNotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error_type, code, msg) = match &self {
            AppError::Unauthorized => (
                "authentication_error",
                "unauthorized",
                "login required".to_string(),
            ),
            AppError::UserNotFound => (
                "authentication_error",
                "user_not_found",
                "user not found".to_string(),
            ),
            AppError::InvalidCredentials => (
                "authentication_error",
                "invalid_credentials",
                "invalid password".to_string(),
            ),
            AppError::WorkspaceNotFound => (
                "not_found_error",
                "workspace_not_found",
                "workspace not found".to_string(),
            ),
            AppError::TokenNotFound => (
                "not_found_error",
                "token_not_found",
                "token not found".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                (
                    "internal_error",
                    "internal_server_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": msg,
                "type": error_type,
                "code": code,
            }
        }));

        (self.status(), body).into_response()
    }
}
