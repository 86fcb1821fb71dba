use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        menu::{
            CreateMenuDto, MenuCategoryDto, MenuDto, MenuListQuery, MenuSearchQuery, UpdateMenuDto,
        },
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        model::menu::{categories, Menu},
        service::menu::MenuService,
        state::AppState,
    },
};

/// Tag for grouping menu endpoints in OpenAPI documentation
pub static MENU_TAG: &str = "menu";

fn into_dtos(menus: Vec<Menu>) -> Vec<MenuDto> {
    menus.into_iter().map(Menu::into_dto).collect()
}

/// List available menus of a cafe.
///
/// Ordered by category, then name. `category` narrows the list to one category.
#[utoipa::path(
    get,
    path = "/api/v1/menu/cafe/{cafe_id}",
    tag = MENU_TAG,
    params(("cafe_id" = String, Path, description = "Cafe ID"), MenuListQuery),
    responses(
        (status = 200, description = "Available menus", body = [MenuDto]),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_by_cafe(
    State(state): State<AppState>,
    Path(cafe_id): Path<String>,
    Query(query): Query<MenuListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let menus = MenuService::new(&state.db)
        .list_by_cafe(&cafe_id, query.category.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(into_dtos(menus)))))
}

/// The fixed menu categories with their display names.
#[utoipa::path(
    get,
    path = "/api/v1/menu/categories",
    tag = MENU_TAG,
    responses(
        (status = 200, description = "Menu categories", body = [MenuCategoryDto])
    ),
)]
pub async fn get_categories() -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::ok(categories())))
}

/// Search available menus by name or description.
///
/// # Returns
/// - `200 OK` - Matching menus, optionally limited to one cafe
/// - `400 Bad Request` - Empty or missing `q`
#[utoipa::path(
    get,
    path = "/api/v1/menu/search",
    tag = MENU_TAG,
    params(MenuSearchQuery),
    responses(
        (status = 200, description = "Matching menus", body = [MenuDto]),
        (status = 400, description = "Search query is required", body = ErrorDto)
    ),
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<MenuSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let menus = MenuService::new(&state.db)
        .search(query.q.as_deref().unwrap_or_default(), query.cafe_id.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(into_dtos(menus)))))
}

/// Get one menu item. Unavailable items are returned too; deleted ones are not.
#[utoipa::path(
    get,
    path = "/api/v1/menu/{id}",
    tag = MENU_TAG,
    params(("id" = String, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu item", body = MenuDto),
        (status = 404, description = "Menu not found", body = ErrorDto)
    ),
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let menu = MenuService::new(&state.db).get(&id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(menu.into_dto()))))
}

/// Add a menu item to the owner's cafe.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `201 Created` - Menu created
/// - `400 Bad Request` - Missing name or category, or price not above zero
/// - `404 Not Found` - Owner has no cafe
#[utoipa::path(
    post,
    path = "/api/v1/menu",
    tag = MENU_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateMenuDto,
    responses(
        (status = 201, description = "Menu created", body = MenuDto),
        (status = 400, description = "Invalid menu data", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn create_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMenuDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let menu = MenuService::new(&state.db).create(&user.id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            menu.into_dto(),
            "Menu created successfully",
        )),
    ))
}

/// Partially update a menu item of the owner's cafe.
///
/// # Access Control
/// - `Owner`
#[utoipa::path(
    put,
    path = "/api/v1/menu/{id}",
    tag = MENU_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Menu ID")),
    request_body = UpdateMenuDto,
    responses(
        (status = 200, description = "Menu updated", body = MenuDto),
        (status = 400, description = "Invalid menu data", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Menu not found in the owner's cafe", body = ErrorDto)
    ),
)]
pub async fn update_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMenuDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let menu = MenuService::new(&state.db)
        .update(&user.id, &id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            menu.into_dto(),
            "Menu updated successfully",
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/menu/{id}",
    tag = MENU_TAG,
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu deleted", body = MessageDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Menu not found in the owner's cafe", body = ErrorDto)
    ),
)]
pub async fn delete_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    MenuService::new(&state.db).delete(&user.id, &id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Menu deleted successfully"))))
}
