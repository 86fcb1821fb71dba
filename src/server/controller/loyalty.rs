use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageQuery},
        loyalty::{
            CreateLoyaltyProgramDto, CreateLoyaltyRewardDto, LoyaltyMemberDto, LoyaltyProgramDto,
            LoyaltyRewardDto, LoyaltyTransactionDto, MemberRewardDto, RedeemRewardDto,
        },
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::{AuthGuard, Permission},
        model::page::{PageRequest, DEFAULT_LIMIT},
        service::loyalty::LoyaltyService,
        state::AppState,
    },
};

/// Tag for grouping loyalty endpoints in OpenAPI documentation
pub static LOYALTY_TAG: &str = "loyalty";

/// Create the loyalty program of the owner's cafe.
///
/// # Access Control
/// - `Owner`
///
/// # Returns
/// - `201 Created` - Program created
/// - `400 Bad Request` - Invalid rates or expiry, or the cafe already has a program
/// - `404 Not Found` - Owner has no cafe
#[utoipa::path(
    post,
    path = "/api/v1/loyalty/program",
    tag = LOYALTY_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateLoyaltyProgramDto,
    responses(
        (status = 201, description = "Program created", body = LoyaltyProgramDto),
        (status = 400, description = "Invalid program or program exists", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe not found", body = ErrorDto)
    ),
)]
pub async fn create_program(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateLoyaltyProgramDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let program = LoyaltyService::new(&state.db)
        .create_program(&user.id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            program.into_dto(),
            "Loyalty program created successfully",
        )),
    ))
}

/// The active loyalty program of a cafe.
#[utoipa::path(
    get,
    path = "/api/v1/loyalty/cafe/{cafe_id}",
    tag = LOYALTY_TAG,
    params(("cafe_id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 200, description = "Loyalty program", body = LoyaltyProgramDto),
        (status = 404, description = "Loyalty program not found", body = ErrorDto)
    ),
)]
pub async fn get_program(
    State(state): State<AppState>,
    Path(cafe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let program = LoyaltyService::new(&state.db)
        .program_for_cafe(&cafe_id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(program.into_dto()))))
}

/// Join the loyalty program of a cafe.
///
/// New members start at bronze with no points.
///
/// # Access Control
/// - `Customer`
///
/// # Returns
/// - `201 Created` - Membership created
/// - `400 Bad Request` - Already a member
/// - `404 Not Found` - Cafe has no active program
#[utoipa::path(
    post,
    path = "/api/v1/loyalty/cafe/{cafe_id}/join",
    tag = LOYALTY_TAG,
    security(("bearer_auth" = [])),
    params(("cafe_id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 201, description = "Joined program", body = LoyaltyMemberDto),
        (status = 400, description = "Already a member", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 404, description = "Loyalty program not found", body = ErrorDto)
    ),
)]
pub async fn join_program(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(cafe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Customer])
        .await?;

    let member = LoyaltyService::new(&state.db)
        .join(&cafe_id, &user.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            member.into_dto(),
            "Successfully joined loyalty program",
        )),
    ))
}

/// Add a reward to the owner's active program.
///
/// # Access Control
/// - `Owner`
#[utoipa::path(
    post,
    path = "/api/v1/loyalty/rewards",
    tag = LOYALTY_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateLoyaltyRewardDto,
    responses(
        (status = 201, description = "Reward created", body = LoyaltyRewardDto),
        (status = 400, description = "Invalid reward data", body = ErrorDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Cafe or program not found", body = ErrorDto)
    ),
)]
pub async fn create_reward(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateLoyaltyRewardDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let reward = LoyaltyService::new(&state.db)
        .create_reward(&user.id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            reward.into_dto(Utc::now()),
            "Reward created successfully",
        )),
    ))
}

/// Active rewards of a cafe, cheapest first, each flagged with current availability.
#[utoipa::path(
    get,
    path = "/api/v1/loyalty/cafe/{cafe_id}/rewards",
    tag = LOYALTY_TAG,
    params(("cafe_id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 200, description = "Rewards", body = [LoyaltyRewardDto])
    ),
)]
pub async fn list_rewards(
    State(state): State<AppState>,
    Path(cafe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rewards = LoyaltyService::new(&state.db)
        .rewards_for_cafe(&cafe_id)
        .await?;

    let now = Utc::now();
    let rewards: Vec<LoyaltyRewardDto> = rewards.into_iter().map(|r| r.into_dto(now)).collect();

    Ok((StatusCode::OK, Json(ApiResponse::ok(rewards))))
}

/// Spend points on a reward.
///
/// Points are deducted, the reward is issued to the member and the redemption is
/// recorded in the ledger, all in one transaction.
///
/// # Access Control
/// - `Customer` - Must be a member of the reward's program
///
/// # Returns
/// - `201 Created` - Issued member reward and remaining points
/// - `400 Bad Request` - Reward inactive, expired, used up, or insufficient points
/// - `403 Forbidden` - Caller is not a member of the program
/// - `404 Not Found` - Reward not found
#[utoipa::path(
    post,
    path = "/api/v1/loyalty/rewards/{reward_id}/redeem",
    tag = LOYALTY_TAG,
    security(("bearer_auth" = [])),
    params(("reward_id" = String, Path, description = "Reward ID")),
    responses(
        (status = 201, description = "Reward redeemed", body = RedeemRewardDto),
        (status = 400, description = "Reward unavailable or insufficient points", body = ErrorDto),
        (status = 403, description = "Not a member of the program", body = ErrorDto),
        (status = 404, description = "Reward not found", body = ErrorDto)
    ),
)]
pub async fn redeem_reward(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(reward_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Customer])
        .await?;

    let redemption = LoyaltyService::new(&state.db)
        .redeem(&user.id, &reward_id, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            redemption.into_dto(),
            "Reward redeemed successfully",
        )),
    ))
}

/// Rewards issued to the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/loyalty/rewards",
    tag = LOYALTY_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Member rewards", body = [MemberRewardDto]),
        (status = 403, description = "Caller is not a customer", body = ErrorDto)
    ),
)]
pub async fn get_member_rewards(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Customer])
        .await?;

    let rewards = LoyaltyService::new(&state.db)
        .member_rewards(&user.id)
        .await?;
    let rewards: Vec<MemberRewardDto> = rewards.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(ApiResponse::ok(rewards))))
}

/// The caller's points ledger in one cafe, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/loyalty/cafe/{cafe_id}/transactions",
    tag = LOYALTY_TAG,
    security(("bearer_auth" = [])),
    params(("cafe_id" = String, Path, description = "Cafe ID"), PageQuery),
    responses(
        (status = 200, description = "Paginated transactions", body = [LoyaltyTransactionDto]),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 404, description = "Loyalty membership not found", body = ErrorDto)
    ),
)]
pub async fn get_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(cafe_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Customer])
        .await?;

    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let transactions = LoyaltyService::new(&state.db)
        .transactions(&user.id, &cafe_id, page)
        .await?;

    Ok((StatusCode::OK, Json(transactions.into_dto(|t| t.into_dto()))))
}
