use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageQuery},
        cafe::{CafeDto, CafeListQuery, CreateReviewDto, ReviewDto},
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        model::{
            cafe::CafeFilter,
            page::{PageRequest, DEFAULT_LIMIT},
        },
        service::cafe::CafeService,
        state::AppState,
    },
};

/// Tag for grouping public cafe endpoints in OpenAPI documentation
pub static CAFE_TAG: &str = "cafe";

/// List active cafes.
///
/// Filters by a case-insensitive name/description search, by city and by open state.
/// Results are ordered by rating, best first, then newest.
///
/// # Returns
/// - `200 OK` - Paginated cafes
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/v1/cafes",
    tag = CAFE_TAG,
    params(CafeListQuery),
    responses(
        (status = 200, description = "Paginated cafes", body = [CafeDto]),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_cafes(
    State(state): State<AppState>,
    Query(query): Query<CafeListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let filter = CafeFilter {
        search: query.search,
        city: query.city,
        is_open: query.is_open,
    };

    let cafes = CafeService::new(&state.db).list(filter, page).await?;

    Ok((StatusCode::OK, Json(cafes.into_dto(|c| c.into_dto()))))
}

/// Get an active cafe.
///
/// # Returns
/// - `200 OK` - Cafe details
/// - `404 Not Found` - No active cafe with that id
#[utoipa::path(
    get,
    path = "/api/v1/cafes/{id}",
    tag = CAFE_TAG,
    params(("id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 200, description = "Cafe details", body = CafeDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn get_cafe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cafe = CafeService::new(&state.db).get(&id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(cafe.into_dto()))))
}

/// List reviews of a cafe, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/cafes/{id}/reviews",
    tag = CAFE_TAG,
    params(("id" = String, Path, description = "Cafe ID"), PageQuery),
    responses(
        (status = 200, description = "Paginated reviews", body = [ReviewDto]),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn get_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);

    let reviews = CafeService::new(&state.db).reviews(&id, page).await?;

    Ok((StatusCode::OK, Json(reviews.into_dto(|r| r.into_dto()))))
}

/// Review a cafe.
///
/// Each customer may review a cafe once; the cafe's rating average and count are
/// recomputed afterwards.
///
/// # Access Control
/// - `Customer`
///
/// # Returns
/// - `201 Created` - Review stored
/// - `400 Bad Request` - Rating outside 1..=5, or the caller already reviewed this cafe
/// - `403 Forbidden` - Caller is not a customer
/// - `404 Not Found` - Cafe not found
#[utoipa::path(
    post,
    path = "/api/v1/cafes/{id}/reviews",
    tag = CAFE_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Cafe ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 400, description = "Invalid rating or duplicate review", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Customer])
        .await?;

    let review = CafeService::new(&state.db)
        .create_review(&id, &user.id, payload.rating, payload.comment)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            review.into_dto(),
            "Review created successfully",
        )),
    ))
}
