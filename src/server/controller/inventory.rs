use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto, PageQuery},
        inventory::{
            CreateInventoryDto, CreateStockMovementDto, ExpiringQuery, InventoryItemDto,
            InventoryListQuery, StockMovementDto, StockMovementResultDto, UpdateInventoryDto,
        },
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        model::{
            inventory::{
                InventoryFilter, InventoryItem, StockStatus, DEFAULT_EXPIRY_WINDOW_DAYS,
                DEFAULT_INVENTORY_LIMIT,
            },
            page::{PageRequest, DEFAULT_LIMIT},
        },
        service::inventory::InventoryService,
        state::AppState,
    },
};

/// Tag for grouping inventory endpoints in OpenAPI documentation
pub static INVENTORY_TAG: &str = "inventory";

fn into_dtos(items: Vec<InventoryItem>) -> Vec<InventoryItemDto> {
    items.into_iter().map(InventoryItem::into_dto).collect()
}

/// List stock items of the owner's cafe, ordered by name.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `200 OK` - Paginated items, 50 per page by default
/// - `400 Bad Request` - `status` is not low, optimal or overstock
/// - `404 Not Found` - Owner has no cafe
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    params(InventoryListQuery),
    responses(
        (status = 200, description = "Paginated inventory items", body = [InventoryItemDto]),
        (status = 400, description = "Unknown stock status", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<InventoryListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(value) => Some(StockStatus::parse(value).ok_or_else(|| {
            AppError::BadRequest("Status must be low, optimal or overstock".to_string())
        })?),
        None => None,
    };
    let filter = InventoryFilter {
        category: query.category,
        location: query.location,
        status,
    };
    let page = PageRequest::new(query.page, query.limit, DEFAULT_INVENTORY_LIMIT);

    let items = InventoryService::new(&state.db)
        .list(&user.id, filter, page)
        .await?;

    Ok((StatusCode::OK, Json(items.into_dto(|i| i.into_dto()))))
}

/// Add a stock item to the owner's cafe.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `201 Created` - Item created
/// - `400 Bad Request` - Missing name, category or unit, negative levels, or a max level
///   below the min level
#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateInventoryDto,
    responses(
        (status = 201, description = "Item created", body = InventoryItemDto),
        (status = 400, description = "Invalid item data", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateInventoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let item = InventoryService::new(&state.db)
        .create(&user.id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            item.into_dto(),
            "Inventory item created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/inventory/{id}",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Inventory item ID")),
    request_body = UpdateInventoryDto,
    responses(
        (status = 200, description = "Item updated", body = InventoryItemDto),
        (status = 400, description = "Invalid item data", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto)
    ),
)]
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<UpdateInventoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let item = InventoryService::new(&state.db)
        .update(&user.id, &id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            item.into_dto(),
            "Inventory item updated successfully",
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Inventory item ID")),
    responses(
        (status = 200, description = "Item deleted", body = MessageDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto)
    ),
)]
pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    InventoryService::new(&state.db).delete(&user.id, &id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Inventory item deleted successfully")),
    ))
}

/// Record a stock movement.
///
/// `in` adds to the stock and stamps the restock time; `out`, `adjustment` and `waste`
/// subtract. The movement and the new balance are written together or not at all.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `201 Created` - Movement and the updated item
/// - `400 Bad Request` - Unknown type, quantity not above zero, missing reason, or
///   insufficient stock
/// - `404 Not Found` - Item not in the owner's cafe
#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/movements",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Inventory item ID")),
    request_body = CreateStockMovementDto,
    responses(
        (status = 201, description = "Movement recorded", body = StockMovementResultDto),
        (status = 400, description = "Invalid movement or insufficient stock", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto)
    ),
)]
pub async fn create_movement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<CreateStockMovementDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let (movement, item) = InventoryService::new(&state.db)
        .record_movement(&user, &id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            StockMovementResultDto {
                movement: movement.into_dto(),
                item: item.into_dto(),
            },
            "Stock movement recorded successfully",
        )),
    ))
}

/// Movements of one item, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}/movements",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Inventory item ID"), PageQuery),
    responses(
        (status = 200, description = "Paginated movements", body = [StockMovementDto]),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto)
    ),
)]
pub async fn list_movements(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let movements = InventoryService::new(&state.db)
        .movements(&user.id, &id, page)
        .await?;

    Ok((StatusCode::OK, Json(movements.into_dto(|m| m.into_dto()))))
}

/// Items at or below their minimum stock level.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/reports/low-stock",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Low stock items", body = [InventoryItemDto]),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn low_stock_report(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let items = InventoryService::new(&state.db).low_stock(&user.id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(into_dtos(items)))))
}

/// Items expiring within the next `days` days, soonest first.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/reports/expiring",
    tag = INVENTORY_TAG,
    security(("bearer_auth" = [])),
    params(ExpiringQuery),
    responses(
        (status = 200, description = "Expiring items", body = [InventoryItemDto]),
        (status = 400, description = "Days below 1", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn expiring_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ExpiringQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let days = query.days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS);
    let items = InventoryService::new(&state.db)
        .expiring(&user.id, days)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(into_dtos(items)))))
}
