use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        order::{CreateOrderDto, OrderDto, OrderListQuery, ReceiptQuery, UpdateOrderStatusDto},
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        model::{
            order::CreateOrderParams,
            page::{PageRequest, DEFAULT_LIMIT},
        },
        service::{order::OrderService, receipt::ReceiptFormat},
        state::AppState,
    },
};

/// Tag for grouping order endpoints in OpenAPI documentation
pub static ORDER_TAG: &str = "order";

/// Place an order.
///
/// Prices every line from the current menu price and stores the order with its items in
/// one transaction. All items must come from the same cafe.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `201 Created` - Order with its items and their menus
/// - `400 Bad Request` - Empty items, bad quantity, unknown order type or payment method,
///   missing customer name, or items from different cafes
/// - `404 Not Found` - A menu is missing, deleted or unavailable
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = ORDER_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 400, description = "Invalid order", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Menu item not found or unavailable", body = ErrorDto)
    ),
)]
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let params = CreateOrderParams::from_dto(user.id, payload).map_err(AppError::BadRequest)?;
    let order = OrderService::new(&state.db).create(params).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            order.into_dto(),
            "Order created successfully",
        )),
    ))
}

/// The caller's orders, newest first, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = ORDER_TAG,
    security(("bearer_auth" = [])),
    params(OrderListQuery),
    responses(
        (status = 200, description = "Paginated orders", body = [OrderDto]),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let orders = OrderService::new(&state.db)
        .list_for_user(&user.id, query.status, page)
        .await?;

    Ok((StatusCode::OK, Json(orders.into_dto(|o| o.into_dto()))))
}

/// Get one order.
///
/// # Access Control
/// - `Customer` - Own orders only
/// - `Owner` - Orders of their cafe only
///
/// Orders outside that scope are reported as missing.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = ORDER_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = OrderDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let order = OrderService::new(&state.db).get_for_user(&user, &id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(order.into_dto()))))
}

/// Move an order of the owner's cafe to a new status.
///
/// Completing an order stamps `completed_at` and awards loyalty points to the customer
/// when they are a member of the cafe's program.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `200 OK` - Updated order
/// - `400 Bad Request` - Unknown status
/// - `404 Not Found` - Owner has no cafe, or the order is not in it
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/status",
    tag = ORDER_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order ID")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Status updated", body = OrderDto),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let order = OrderService::new(&state.db)
        .update_status(&user.id, &id, &payload.status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            order.into_dto(),
            "Order status updated successfully",
        )),
    ))
}

/// Plain-text receipt of an order visible to the caller.
///
/// `format=full` (default) renders the printable receipt, `format=mini` a short chat-style
/// summary.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/receipt",
    tag = ORDER_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order ID"), ReceiptQuery),
    responses(
        (status = 200, description = "Receipt text", body = String, content_type = "text/plain"),
        (status = 400, description = "Unknown format", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn get_receipt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ReceiptQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let format = ReceiptFormat::parse(query.format.as_deref())
        .ok_or_else(|| AppError::BadRequest("Format must be full or mini".to_string()))?;

    let receipt = OrderService::new(&state.db)
        .receipt(&user, &id, format, state.cafe_info())
        .await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        receipt,
    ))
}
