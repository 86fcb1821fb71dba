use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        payment::{PaymentDto, PaymentInstructionsDto, PaymentStatusDto, ProcessPaymentDto},
    },
    server::{
        error::AppError,
        extract::Json,
        middleware::auth::{AuthGuard, Permission},
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

/// Start paying for one of the caller's orders.
///
/// The amount must match the order total. The response carries method-specific
/// instructions: a wallet address and QR payload for crypto, counter instructions for
/// cash, or a virtual account for bank transfer.
///
/// # Access Control
/// - Any authenticated user, for their own orders
///
/// # Returns
/// - `200 OK` - Payment created with instructions
/// - `400 Bad Request` - Unknown method or amount mismatch
/// - `404 Not Found` - Order missing or not the caller's
#[utoipa::path(
    post,
    path = "/api/v1/payment/process",
    tag = PAYMENT_TAG,
    security(("bearer_auth" = [])),
    request_body = ProcessPaymentDto,
    responses(
        (status = 200, description = "Payment instructions", body = PaymentInstructionsDto),
        (status = 400, description = "Invalid method or amount", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn process_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ProcessPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let instructions = PaymentService::new(&state.db)
        .process(&user.id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            instructions.into_dto(),
            "Payment initiated successfully",
        )),
    ))
}

/// Latest payment of one of the caller's orders.
#[utoipa::path(
    get,
    path = "/api/v1/payment/status/{order_id}",
    tag = PAYMENT_TAG,
    security(("bearer_auth" = [])),
    params(("order_id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment status", body = PaymentStatusDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Order or payment not found", body = ErrorDto)
    ),
)]
pub async fn get_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let status = PaymentService::new(&state.db)
        .status(&user.id, &order_id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(status.into_dto()))))
}

/// Mark a payment as received.
///
/// # Access Control
/// - `Owner` - Only for orders of their cafe
#[utoipa::path(
    put,
    path = "/api/v1/payment/{payment_id}/confirm",
    tag = PAYMENT_TAG,
    security(("bearer_auth" = [])),
    params(("payment_id" = String, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment confirmed", body = PaymentDto),
        (status = 403, description = "Caller is not an owner", body = ErrorDto),
        (status = 404, description = "Payment not found in the owner's cafe", body = ErrorDto)
    ),
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Owner])
        .await?;

    let payment = PaymentService::new(&state.db)
        .confirm(&user.id, &payment_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            payment.into_dto(),
            "Payment confirmed successfully",
        )),
    ))
}
