use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        analytics::AnalyticsDto,
        api::{ApiResponse, ErrorDto},
        order::{OrderDto, OrderListQuery},
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        model::page::{PageRequest, DEFAULT_LIMIT},
        service::{analytics::AnalyticsService, order::OrderService},
        state::AppState,
    },
};

/// Tag for grouping platform-wide endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Sales across all cafes over the last 30 days.
///
/// # Access Control
/// - `Owner`
#[utoipa::path(
    get,
    path = "/api/v1/admin/analytics",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Platform analytics", body = AnalyticsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let analytics = AnalyticsService::new(&state.db).platform().await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(analytics.into_dto()))))
}

/// All orders, newest first, optionally filtered by status.
///
/// # Access Control
/// - `Owner`
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    params(OrderListQuery),
    responses(
        (status = 200, description = "Paginated orders", body = [OrderDto]),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto)
    ),
)]
pub async fn get_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let orders = OrderService::new(&state.db)
        .list_all(query.status, page)
        .await?;

    Ok((StatusCode::OK, Json(orders.into_dto(|o| o.into_dto()))))
}
