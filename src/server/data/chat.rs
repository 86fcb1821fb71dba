use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::chat::{ChatMessage, NewChatMessage};

pub struct ChatRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChatRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a message. AI replies are stored as already processed.
    pub async fn create(&self, message: NewChatMessage) -> Result<ChatMessage, DbErr> {
        let now = Utc::now();
        let chat = entity::chat::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            user_id: ActiveValue::Set(message.user_id),
            session_id: ActiveValue::Set(message.session_id),
            message: ActiveValue::Set(message.message),
            is_ai: ActiveValue::Set(message.is_ai),
            context: ActiveValue::Set(message.context),
            intent: ActiveValue::Set(message.intent),
            processed: ActiveValue::Set(message.is_ai),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(ChatMessage::from_entity(chat))
    }

    /// The most recent `limit` messages of a session, returned oldest first.
    pub async fn recent_for_session(
        &self,
        user_id: &str,
        session_id: &str,
        limit: u64,
    ) -> Result<Vec<ChatMessage>, DbErr> {
        let mut messages: Vec<ChatMessage> = entity::prelude::Chat::find()
            .filter(entity::chat::Column::UserId.eq(user_id))
            .filter(entity::chat::Column::SessionId.eq(session_id))
            .order_by_desc(entity::chat::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(ChatMessage::from_entity)
            .collect();

        messages.reverse();
        Ok(messages)
    }

    /// All messages of a user in chronological order, optionally for one session.
    pub async fn history(
        &self,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<Vec<ChatMessage>, DbErr> {
        let mut query =
            entity::prelude::Chat::find().filter(entity::chat::Column::UserId.eq(user_id));
        if let Some(session_id) = session_id.filter(|s| !s.is_empty()) {
            query = query.filter(entity::chat::Column::SessionId.eq(session_id));
        }

        let messages = query
            .order_by_asc(entity::chat::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(messages.into_iter().map(ChatMessage::from_entity).collect())
    }
}
