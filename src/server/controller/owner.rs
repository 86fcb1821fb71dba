use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        analytics::{AnalyticsDto, AnalyticsQuery},
        api::{ApiResponse, ErrorDto},
        cafe::{CafeDto, CreateCafeDto, UpdateCafeDto},
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        service::{analytics::AnalyticsService, cafe::CafeService},
        state::AppState,
    },
};

/// Tag for grouping cafe management endpoints in OpenAPI documentation
pub static OWNER_TAG: &str = "owner";

/// Open a cafe for the calling owner.
///
/// New cafes start open and active, with a 10% tax and a 5 km delivery radius unless
/// the payload says otherwise.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `201 Created` - Cafe created
/// - `400 Bad Request` - Missing name, or the owner already has a cafe
/// - `403 Forbidden` - Caller is not an owner
#[utoipa::path(
    post,
    path = "/api/v1/owner/cafe",
    tag = OWNER_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateCafeDto,
    responses(
        (status = 201, description = "Cafe created", body = CafeDto),
        (status = 400, description = "Invalid data or cafe already exists", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto)
    ),
)]
pub async fn create_cafe(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateCafeDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let cafe = CafeService::new(&state.db)
        .create_owned(&user.id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            cafe.into_dto(),
            "Cafe created successfully",
        )),
    ))
}

/// Get the calling owner's cafe.
///
/// # Access Control
/// - `Owner`
#[utoipa::path(
    get,
    path = "/api/v1/owner/cafe",
    tag = OWNER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owner's cafe", body = CafeDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn get_cafe(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let cafe = CafeService::new(&state.db).owned(&user.id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(cafe.into_dto()))))
}

/// Partially update the calling owner's cafe.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `200 OK` - Updated cafe
/// - `400 Bad Request` - Empty name or negative amounts
/// - `404 Not Found` - Owner has no cafe
#[utoipa::path(
    put,
    path = "/api/v1/owner/cafe",
    tag = OWNER_TAG,
    security(("bearer_auth" = [])),
    request_body = UpdateCafeDto,
    responses(
        (status = 200, description = "Cafe updated", body = CafeDto),
        (status = 400, description = "Invalid data", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn update_cafe(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateCafeDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let cafe = CafeService::new(&state.db)
        .update_owned(&user.id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            cafe.into_dto(),
            "Cafe updated successfully",
        )),
    ))
}

/// Flip the calling owner's cafe between open and closed.
#[utoipa::path(
    put,
    path = "/api/v1/owner/cafe/toggle-status",
    tag = OWNER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Open state toggled", body = CafeDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn toggle_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let cafe = CafeService::new(&state.db).toggle_open(&user.id).await?;
    let message = if cafe.is_open {
        "Cafe is now open"
    } else {
        "Cafe is now closed"
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(cafe.into_dto(), message)),
    ))
}

/// Sales analytics of the calling owner's cafe.
///
/// The window is inclusive and defaults to the last 30 days.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `200 OK` - Totals, status breakdown, top items and daily stats
/// - `400 Bad Request` - Dates not in `YYYY-MM-DD` form, or start after end
/// - `404 Not Found` - Owner has no cafe
#[utoipa::path(
    get,
    path = "/api/v1/owner/cafe/analytics",
    tag = OWNER_TAG,
    security(("bearer_auth" = [])),
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Cafe analytics", body = AnalyticsDto),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let analytics = AnalyticsService::new(&state.db)
        .for_owner(
            &user.id,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(analytics.into_dto()))))
}
