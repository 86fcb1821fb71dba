use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        auth::{AuthResponseDto, LoginDto, RegisterDto},
    },
    server::{
        error::AppError,
        extract::Json,
        middleware::auth::AuthGuard,
        model::auth::RegisterParams,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Creates a customer or owner account and returns a bearer token for it, so clients
/// do not need a separate login round-trip.
///
/// # Returns
/// - `201 Created` - Account created, token issued
/// - `400 Bad Request` - Missing name, malformed email, short password or unknown role
/// - `409 Conflict` - Email already registered
/// - `500 Internal Server Error` - Database or hashing error
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload).map_err(AppError::BadRequest)?;

    let session = AuthService::new(&state.db, &state.jwt)
        .register(params)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            session.into_dto(),
            "User registered successfully",
        )),
    ))
}

/// Log in with email and password.
///
/// # Returns
/// - `200 OK` - Token issued
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.jwt)
        .login(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(session.into_dto(), "Login successful")),
    ))
}

/// Issue a fresh token for the current user.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = AUTH_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token refreshed", body = AuthResponseDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let session = AuthService::new(&state.db, &state.jwt).refresh(user)?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(session.into_dto()))))
}
