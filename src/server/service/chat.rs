//! Chat sessions with the concierge.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    concierge::Concierge,
    data::{cafe::CafeRepository, chat::ChatRepository, menu::MenuRepository},
    error::AppError,
    model::chat::{
        ChatMessage, ConciergeReply, NewChatMessage, HISTORY_WINDOW, INTENT_USER_MESSAGE,
    },
};

pub struct ChatService<'a> {
    db: &'a DatabaseConnection,
    concierge: &'a Concierge,
}

impl<'a> ChatService<'a> {
    pub fn new(db: &'a DatabaseConnection, concierge: &'a Concierge) -> Self {
        Self { db, concierge }
    }

    /// Stores the user's message, asks the concierge and stores its reply.
    ///
    /// A new session id is generated when none is given.
    ///
    /// # Returns
    /// - `Ok((ConciergeReply, String))` - Reply and the session id it belongs to
    /// - `Err(AppError::BadRequest)` - Empty message
    /// - `Err(AppError::GeminiErr)` - The language model call failed
    pub async fn process_message(
        &self,
        user_id: &str,
        message: &str,
        session_id: Option<String>,
    ) -> Result<(ConciergeReply, String), AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::BadRequest("Message is required".to_string()));
        }
        let session_id = session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let chat_repo = ChatRepository::new(self.db);
        chat_repo
            .create(NewChatMessage {
                user_id: user_id.to_string(),
                session_id: session_id.clone(),
                message: message.to_string(),
                is_ai: false,
                intent: INTENT_USER_MESSAGE.to_string(),
                context: None,
            })
            .await?;

        let history = chat_repo
            .recent_for_session(user_id, &session_id, HISTORY_WINDOW)
            .await?;

        let cafe_ids = CafeRepository::new(self.db).open_cafe_ids().await?;
        let menus = MenuRepository::new(self.db)
            .list_available_in_cafes(cafe_ids)
            .await?;

        let reply = self.concierge.respond(message, &history, &menus).await?;

        let context = reply
            .order_intent
            .as_ref()
            .and_then(|intent| serde_json::to_string(intent).ok());
        chat_repo
            .create(NewChatMessage {
                user_id: user_id.to_string(),
                session_id: session_id.clone(),
                message: reply.message.clone(),
                is_ai: true,
                intent: reply.intent.clone(),
                context,
            })
            .await?;

        tracing::debug!(
            "Chat session {} answered with intent {}",
            session_id,
            reply.intent
        );

        Ok((reply, session_id))
    }

    /// The user's messages oldest first, optionally for one session.
    pub async fn history(
        &self,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<Vec<ChatMessage>, AppError> {
        Ok(ChatRepository::new(self.db)
            .history(user_id, session_id)
            .await?)
    }
}
