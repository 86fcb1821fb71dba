use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        loyalty::MembershipDto,
        order::{OrderDto, OrderListQuery},
        user::{ChangePasswordDto, DeleteAccountDto, FavoriteDto, ProfileDto, UpdateProfileDto, UserDto},
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::{PageRequest, DEFAULT_LIMIT},
            user::UpdateProfileParams,
        },
        service::{order::OrderService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping account endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Get the caller's profile.
///
/// Owners also get their cafe embedded under `cafe` when they have one.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/user/profile",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = ProfileDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db).profile(user).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(profile.into_dto()))))
}

/// Update name, email, phone or address of the caller.
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Empty name, malformed email, or email used by another account
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    put,
    path = "/api/v1/user/profile",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let updated = UserService::new(&state.db)
        .update_profile(&user.id, UpdateProfileParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            updated.into_dto(),
            "Profile updated successfully",
        )),
    ))
}

/// Change the caller's password.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Current password wrong, or new password shorter than 6 characters
#[utoipa::path(
    put,
    path = "/api/v1/user/password",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Wrong current password or weak new password", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db)
        .change_password(&user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password changed successfully")),
    ))
}

/// The caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/user/orders",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    params(OrderListQuery),
    responses(
        (status = 200, description = "Paginated orders", body = [OrderDto]),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn get_orders(
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

/// Loyalty memberships of the caller with progress towards the next tier.
///
/// # Access Control
/// - `Customer`
#[utoipa::path(
    get,
    path = "/api/v1/user/loyalty",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Memberships", body = [MembershipDto]),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto)
    ),
)]
pub async fn get_loyalty(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Customer])
        .await?;

    let memberships = UserService::new(&state.db).memberships(&user.id).await?;
    let memberships: Vec<MembershipDto> =
        memberships.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(ApiResponse::ok(memberships))))
}

/// The caller's favorite cafes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/user/favorites",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Favorite cafes", body = [FavoriteDto]),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn get_favorites(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let favorites = UserService::new(&state.db).favorites(&user.id).await?;
    let favorites: Vec<FavoriteDto> = favorites.into_iter().map(|f| f.into_dto()).collect();

    Ok((StatusCode::OK, Json(ApiResponse::ok(favorites))))
}

/// Mark a cafe as favorite. Adding an existing favorite returns it unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/user/favorites/{cafe_id}",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    params(("cafe_id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 201, description = "Favorite stored", body = FavoriteDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(cafe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let favorite = UserService::new(&state.db)
        .add_favorite(&user.id, &cafe_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            favorite.into_dto(),
            "Cafe added to favorites",
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/user/favorites/{cafe_id}",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    params(("cafe_id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 200, description = "Favorite removed", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Favorite not found", body = ErrorDto)
    ),
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(cafe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db)
        .remove_favorite(&user.id, &cafe_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Cafe removed from favorites")),
    ))
}

/// Soft delete the caller's account after confirming the password.
///
/// # Returns
/// - `200 OK` - Account deleted; existing tokens stop working
/// - `400 Bad Request` - Wrong password
#[utoipa::path(
    delete,
    path = "/api/v1/user/account",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = DeleteAccountDto,
    responses(
        (status = 200, description = "Account deleted", body = MessageDto),
        (status = 400, description = "Wrong password", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DeleteAccountDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db)
        .delete_account(&user.id, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Account deleted successfully")),
    ))
}
