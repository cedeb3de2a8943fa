use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;
use crate::validation::FieldErrors;

#[derive(Debug)]
pub enum AppError {
    Validation {
        message: &'static str,
        errors: FieldErrors,
    },
    EmailExists,
    /// Login attempted with an email that has no account. Deliberately
    /// distinct from `InvalidCredentials` so the client can offer a signup
    /// link; this is a known user-enumeration trade-off.
    UserNotFound,
    InvalidCredentials,
    Store(StoreError),
    PasswordHash(argon2::password_hash::Error),
    Jwt(jsonwebtoken::errors::Error),
}

impl From<StoreError> for AppError {
    fn from(inner: StoreError) -> Self {
        match inner {
            StoreError::Duplicate => AppError::EmailExists,
            other => AppError::Store(other),
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(inner: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(inner)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(inner: jsonwebtoken::errors::Error) -> Self {
        AppError::Jwt(inner)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { message, errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": message,
                    "errors": errors,
                })),
            )
                .into_response(),
            AppError::EmailExists => (
                StatusCode::CONFLICT,
                Json(json!({
                    "message": "Failed to Create Account.",
                    "errors": { "email": ["Email already exists."] },
                })),
            )
                .into_response(),
            AppError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "USER_NOT_FOUND" })),
            )
                .into_response(),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials." })),
            )
                .into_response(),
            AppError::Store(e) => {
                tracing::error!("store error: {e}");
                system_error()
            }
            AppError::PasswordHash(e) => {
                tracing::error!("password hashing error: {e}");
                system_error()
            }
            AppError::Jwt(e) => {
                tracing::error!("token error: {e}");
                system_error()
            }
        }
    }
}

fn system_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Something went wrong." })),
    )
        .into_response()
}
