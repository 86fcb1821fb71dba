use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{data::chat::ChatRepository, model::chat::NewChatMessage};

mod history;

/// Inserts a chat row with an explicit timestamp so ordering is deterministic.
async fn insert_message(
    db: &DatabaseConnection,
    user_id: &str,
    session_id: &str,
    message: &str,
    created_at: DateTime<Utc>,
) -> Result<entity::chat::Model, DbErr> {
    entity::chat::ActiveModel {
        id: ActiveValue::Set(factory::helpers::new_uuid()),
        user_id: ActiveValue::Set(user_id.to_string()),
        session_id: ActiveValue::Set(session_id.to_string()),
        message: ActiveValue::Set(message.to_string()),
        is_ai: ActiveValue::Set(false),
        context: ActiveValue::Set(None),
        intent: ActiveValue::Set("user_message".to_string()),
        processed: ActiveValue::Set(false),
        created_at: ActiveValue::Set(created_at),
        updated_at: ActiveValue::Set(created_at),
    }
    .insert(db)
    .await
}
