use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token was supplied with the request.
    #[error("Authorization header required")]
    MissingToken,

    /// The bearer token failed signature or expiry validation.
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    /// The token is valid but the user it names is missing or soft-deleted.
    #[error("User {0} referenced by token not found")]
    UserNotFound(String),

    /// Unknown email or wrong password at login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The user's role does not grant the required permission.
    ///
    /// # Fields
    /// - User ID of the caller
    /// - Description of what the caller attempted
    #[error("User {0} denied access: {1}")]
    AccessDenied(String, String),

    /// Registration with an email already held by an active user.
    #[error("Email already registered")]
    EmailTaken,

    /// Signing a token or hashing a password failed.
    #[error("Failed to process credentials: {0}")]
    Credentials(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingToken` / `InvalidToken` / `UserNotFound` / `InvalidCredentials` → 401
/// - `AccessDenied` → 403 with "Insufficient permissions"
/// - `EmailTaken` → 409
/// - `Credentials` → 500 with a generic message
///
/// Details such as the user ID are logged at debug level and never sent to the client.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Authorization header required"),
            Self::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            Self::UserNotFound(_) => (StatusCode::UNAUTHORIZED, "User not found"),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::EmailTaken => (StatusCode::CONFLICT, "Email already registered"),
            Self::Credentials(err) => {
                tracing::error!("Credential processing failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
