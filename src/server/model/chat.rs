//! Chat messages and the structured reply produced by the concierge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::chat::{
    ChatMessageDto, ChatReplyDto, OrderIntentDto, OrderIntentItemDto, OrderSummaryDto,
};

pub const INTENT_USER_MESSAGE: &str = "user_message";
pub const ACTION_CREATE_ORDER: &str = "create_order";
pub const ORDER_CONFIRMATION_MESSAGE: &str =
    "Silakan konfirmasi pesanan Anda untuk melanjutkan ke pembayaran.";

/// Number of stored messages loaded as conversation context.
pub const HISTORY_WINDOW: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub message: String,
    pub is_ai: bool,
    pub intent: String,
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_entity(entity: entity::chat::Model) -> Self {
        Self {
            id: entity.id,
            session_id: entity.session_id,
            message: entity.message,
            is_ai: entity.is_ai,
            intent: entity.intent,
            context: entity.context,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ChatMessageDto {
        ChatMessageDto {
            id: self.id,
            session_id: self.session_id,
            message: self.message,
            is_ai: self.is_ai,
            intent: self.intent,
            context: self.context,
            created_at: self.created_at,
        }
    }
}

/// A chat message to persist.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: String,
    pub session_id: String,
    pub message: String,
    pub is_ai: bool,
    pub intent: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntentItem {
    pub menu_id: String,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// An order the concierge inferred from the conversation, awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub action: String,
    #[serde(default)]
    pub items: Vec<OrderIntentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderIntent {
    pub fn into_dto(self) -> OrderIntentDto {
        OrderIntentDto {
            action: self.action,
            items: self
                .items
                .into_iter()
                .map(|item| OrderIntentItemDto {
                    menu_id: item.menu_id,
                    name: item.name,
                    quantity: item.quantity,
                    price: item.price,
                    notes: item.notes,
                })
                .collect(),
            order_type: self.order_type,
            notes: self.notes,
        }
    }
}

/// The concierge's answer. This is also the JSON shape the language model is asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConciergeReply {
    pub message: String,
    pub intent: String,
    #[serde(default)]
    pub order_intent: Option<OrderIntent>,
    #[serde(default)]
    pub should_confirm: bool,
}

impl ConciergeReply {
    /// Builds the response, attaching a confirmation summary for order intents.
    pub fn into_dto(self, session_id: String) -> ChatReplyDto {
        let order_intent = self.order_intent.map(OrderIntent::into_dto);
        let order = order_intent
            .as_ref()
            .filter(|intent| intent.action == ACTION_CREATE_ORDER)
            .map(|intent| OrderSummaryDto {
                status: "order_intent_received".to_string(),
                details: intent.clone(),
                message: ORDER_CONFIRMATION_MESSAGE.to_string(),
            });

        ChatReplyDto {
            message: self.message,
            intent: self.intent,
            order_intent,
            should_confirm: self.should_confirm,
            session_id,
            order,
        }
    }
}
