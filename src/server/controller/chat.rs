use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        chat::{
            ChatHistoryDto, ChatHistoryQuery, ChatReplyDto, ChatRequestDto, ChatSocketFrame,
            ChatSocketQuery,
        },
    },
    server::{
        error::AppError,
        extract::{Json, Query},
        middleware::auth::AuthGuard,
        service::chat::ChatService,
        state::AppState,
    },
};

/// Tag for grouping chat endpoints in OpenAPI documentation
pub static CHAT_TAG: &str = "chat";

/// Send a message to the concierge.
///
/// Both the message and the concierge's reply are stored under the session. When the
/// reply carries an order intent with `create_order`, `order` holds a summary for the
/// client to confirm; no order is placed.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - Concierge reply with the session id
/// - `400 Bad Request` - Empty message
/// - `500 Internal Server Error` - Database or language model failure
#[utoipa::path(
    post,
    path = "/api/v1/chat/message",
    tag = CHAT_TAG,
    security(("bearer_auth" = [])),
    request_body = ChatRequestDto,
    responses(
        (status = 200, description = "Concierge reply", body = ChatReplyDto),
        (status = 400, description = "Empty message", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let (reply, session_id) = ChatService::new(&state.db, &state.concierge)
        .process_message(&user.id, &payload.message, payload.session_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(reply.into_dto(session_id))),
    ))
}

/// The caller's chat messages, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/chat/history",
    tag = CHAT_TAG,
    security(("bearer_auth" = [])),
    params(ChatHistoryQuery),
    responses(
        (status = 200, description = "Chat history", body = ChatHistoryDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn get_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ChatHistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let messages = ChatService::new(&state.db, &state.concierge)
        .history(&user.id, query.session_id.as_deref())
        .await?;

    let messages: Vec<_> = messages.into_iter().map(|m| m.into_dto()).collect();
    let count = messages.len();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(ChatHistoryDto { messages, count })),
    ))
}

/// Chat over a WebSocket.
///
/// The token may be passed as `?token=` since browsers cannot set headers on the
/// upgrade request. Each text frame `{"message": "..."}` is answered with
/// `{"success": true, "data": <reply>}`, or `{"error": "..."}` when processing fails.
/// A close frame or a frame that is not valid JSON ends the connection.
#[utoipa::path(
    get,
    path = "/api/v1/chat/ws",
    tag = CHAT_TAG,
    params(ChatSocketQuery),
    responses(
        (status = 101, description = "Switching to the WebSocket protocol"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn chat_socket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ChatSocketQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let guard = match query.token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => AuthGuard::with_token(&state.db, &state.jwt, Some(token)),
        None => AuthGuard::new(&state.db, &state.jwt, &headers),
    };
    let user = guard.require(&[]).await?;

    Ok(ws.on_upgrade(move |socket| run_socket(socket, state, user.id, query.session_id)))
}

async fn run_socket(
    mut socket: WebSocket,
    state: AppState,
    user_id: String,
    mut session_id: Option<String>,
) {
    tracing::debug!("Chat socket opened for user {}", user_id);

    while let Some(frame) = socket.recv().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };

        let Ok(frame) = serde_json::from_str::<ChatSocketFrame>(text.as_str()) else {
            break;
        };

        let service = ChatService::new(&state.db, &state.concierge);
        let body = match service
            .process_message(&user_id, &frame.message, session_id.clone())
            .await
        {
            Ok((reply, id)) => {
                session_id = Some(id.clone());
                json!({ "success": true, "data": reply.into_dto(id) })
            }
            Err(err) => {
                tracing::warn!("Chat socket message failed for user {}: {}", user_id, err);
                json!({ "error": socket_error(&err) })
            }
        };

        if socket
            .send(Message::Text(body.to_string().into()))
            .await
            .is_err()
        {
            break;
        }
    }

    tracing::debug!("Chat socket closed for user {}", user_id);
}

/// Client-facing text for a failed socket message.
fn socket_error(err: &AppError) -> String {
    match err {
        AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Forbidden(msg) => {
            msg.clone()
        }
        _ => "Failed to process message".to_string(),
    }
}
