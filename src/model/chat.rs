use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ChatRequestDto {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct OrderIntentItemDto {
    pub menu_id: String,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct OrderIntentDto {
    pub action: String,
    pub items: Vec<OrderIntentItemDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Pending confirmation summary returned when the concierge detects an order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct OrderSummaryDto {
    pub status: String,
    pub details: OrderIntentDto,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ChatReplyDto {
    pub message: String,
    pub intent: String,
    pub order_intent: Option<OrderIntentDto>,
    pub should_confirm: bool,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderSummaryDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ChatMessageDto {
    pub id: String,
    pub session_id: String,
    pub message: String,
    pub is_ai: bool,
    pub intent: String,
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ChatHistoryDto {
    pub messages: Vec<ChatMessageDto>,
    pub count: usize,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChatHistoryQuery {
    pub session_id: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChatSocketQuery {
    pub session_id: Option<String>,
    /// Bearer token, for clients that cannot set headers on upgrade
    pub token: Option<String>,
}

/// Text frame sent by a WebSocket client.
#[derive(Deserialize, Debug)]
pub struct ChatSocketFrame {
    pub message: String,
}
