use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

use super::*;
use crate::server::{
    concierge::{gemini::GeminiClient, Concierge},
    model::{
        cafe::CafeInfo,
        chat::{ACTION_CREATE_ORDER, HISTORY_WINDOW, INTENT_USER_MESSAGE},
    },
    service::chat::ChatService,
};

fn cafe_info() -> CafeInfo {
    CafeInfo {
        name: "SiipCoffee".to_string(),
        address: "Jl. Cafe No. 123, Jakarta".to_string(),
        phone: "+62 812-3456-7890".to_string(),
    }
}

fn offline() -> Concierge {
    Concierge::new(None, cafe_info())
}

async fn stored_rows(
    db: &DatabaseConnection,
    session_id: &str,
) -> Result<Vec<entity::chat::Model>, AppError> {
    Ok(entity::prelude::Chat::find()
        .filter(entity::chat::Column::SessionId.eq(session_id))
        .order_by_asc(entity::chat::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Tests a message answered by the offline concierge.
///
/// Verifies that a session id is generated, that the user message and the reply are
/// both stored, and that the reply carries the order intent as its context.
///
/// Expected: user row with intent user_message, AI row processed with create_order context
#[tokio::test]
async fn stores_message_and_reply() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let cappuccino = factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Cappuccino")
        .price(25000.0)
        .build()
        .await?;
    let customer = factory::create_customer(db).await?;
    let concierge = offline();

    let (reply, session_id) = ChatService::new(db, &concierge)
        .process_message(&customer.id, "  mau dua cappuccino, bawa pulang ", None)
        .await?;

    assert!(uuid::Uuid::parse_str(&session_id).is_ok());
    assert_eq!(reply.intent, "order");
    assert!(reply.should_confirm);
    let intent = reply.order_intent.clone().unwrap();
    assert_eq!(intent.action, ACTION_CREATE_ORDER);
    assert_eq!(intent.items[0].menu_id, cappuccino.id);
    assert_eq!(intent.items[0].quantity, 2);

    let rows = stored_rows(db, &session_id).await?;
    assert_eq!(rows.len(), 2);

    let user_row = rows.iter().find(|r| !r.is_ai).unwrap();
    assert_eq!(user_row.message, "mau dua cappuccino, bawa pulang");
    assert_eq!(user_row.intent, INTENT_USER_MESSAGE);
    assert!(!user_row.processed);
    assert!(user_row.context.is_none());

    let ai_row = rows.iter().find(|r| r.is_ai).unwrap();
    assert!(ai_row.processed);
    assert_eq!(ai_row.intent, "order");
    assert_eq!(ai_row.message, reply.message);
    let context: serde_json::Value =
        serde_json::from_str(ai_row.context.as_deref().unwrap()).unwrap();
    assert_eq!(context["action"], ACTION_CREATE_ORDER);
    assert_eq!(context["order_type"], "take_away");
    assert_eq!(context["items"][0]["name"], "Cappuccino");

    Ok(())
}

/// Tests that a given session id is reused and a reply without an order has no context.
///
/// Expected: 4 rows in the session after two messages
#[tokio::test]
async fn continues_given_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let concierge = offline();
    let service = ChatService::new(db, &concierge);

    let (reply, first) = service
        .process_message(&customer.id, "Halo", Some("session-7".to_string()))
        .await?;
    assert_eq!(first, "session-7");
    assert_eq!(reply.intent, "greeting");
    assert!(reply.order_intent.is_none());

    let (_, second) = service
        .process_message(&customer.id, "Ada menu apa?", Some("session-7".to_string()))
        .await?;
    assert_eq!(second, "session-7");

    let rows = stored_rows(db, "session-7").await?;
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().filter(|r| r.is_ai).all(|r| r.context.is_none()));

    let history = service.history(&customer.id, Some("session-7")).await?;
    assert_eq!(history.len(), 4);

    Ok(())
}

/// Tests that blank messages are rejected before anything is stored.
///
/// Expected: Err(AppError::BadRequest) and no chat rows
#[tokio::test]
async fn rejects_empty_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let concierge = offline();

    let result = ChatService::new(db, &concierge)
        .process_message(&customer.id, "   ", None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(count(db, entity::prelude::Chat).await?, 0);

    Ok(())
}

/// Tests a failing language model call.
///
/// Verifies that the error surfaces and that the user's message is kept while no
/// reply is stored.
///
/// Expected: Err(AppError::GeminiErr) with one user row
#[tokio::test]
async fn keeps_user_message_when_model_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    let gemini = GeminiClient::new(
        reqwest::Client::new(),
        &server.uri(),
        "gemini-2.5-flash",
        "test-key".to_string(),
    )?;
    let concierge = Concierge::new(Some(gemini), cafe_info());
    let customer = factory::create_customer(db).await?;

    let result = ChatService::new(db, &concierge)
        .process_message(&customer.id, "Halo", Some("session-1".to_string()))
        .await;

    assert!(matches!(result, Err(AppError::GeminiErr(_))));
    let rows = stored_rows(db, "session-1").await?;
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_ai);

    Ok(())
}

/// Tests the conversation window handed to the concierge.
///
/// Expected: the newest HISTORY_WINDOW messages, oldest first
#[tokio::test]
async fn loads_bounded_history_window() -> Result<(), AppError> {
    use chrono::{Duration, Utc};
    use sea_orm::{ActiveModelTrait, ActiveValue};

    use crate::server::data::chat::ChatRepository;

    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let start = Utc::now() - Duration::hours(2);
    for i in 1..=25 {
        let created_at = start + Duration::minutes(i);
        entity::chat::ActiveModel {
            id: ActiveValue::Set(factory::helpers::new_uuid()),
            user_id: ActiveValue::Set(customer.id.clone()),
            session_id: ActiveValue::Set("session-1".to_string()),
            message: ActiveValue::Set(format!("message {}", i)),
            is_ai: ActiveValue::Set(i % 2 == 0),
            context: ActiveValue::Set(None),
            intent: ActiveValue::Set(INTENT_USER_MESSAGE.to_string()),
            processed: ActiveValue::Set(i % 2 == 0),
            created_at: ActiveValue::Set(created_at),
            updated_at: ActiveValue::Set(created_at),
        }
        .insert(db)
        .await?;
    }

    let window = ChatRepository::new(db)
        .recent_for_session(&customer.id, "session-1", HISTORY_WINDOW)
        .await?;

    assert_eq!(HISTORY_WINDOW, 20);
    assert_eq!(window.len(), 20);
    assert_eq!(window[0].message, "message 6");
    assert_eq!(window[19].message, "message 25");

    Ok(())
}
