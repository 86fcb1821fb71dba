use super::*;

/// Tests storing a concierge reply.
///
/// Verifies that AI messages are stored as processed and user messages are not.
///
/// Expected: processed flag mirrors is_ai
#[tokio::test]
async fn stores_messages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_customer(db).await?;
    let repo = ChatRepository::new(db);
    let reply = repo
        .create(NewChatMessage {
            user_id: user.id.clone(),
            session_id: "session-1".to_string(),
            message: "Halo! Mau pesan apa?".to_string(),
            is_ai: true,
            intent: "greeting".to_string(),
            context: Some("{}".to_string()),
        })
        .await?;

    assert!(reply.is_ai);
    assert_eq!(reply.intent, "greeting");

    let stored = entity::prelude::Chat::find_by_id(reply.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert!(stored.processed);

    Ok(())
}

/// Tests the conversation window loaded as context.
///
/// Verifies that only the latest `limit` messages of the session are returned and
/// that they come back oldest first.
///
/// Expected: messages 3, 4 and 5 in that order
#[tokio::test]
async fn recent_window_is_chronological() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_customer(db).await?;
    let start = Utc::now() - Duration::hours(1);
    for i in 1..=5 {
        insert_message(
            db,
            &user.id,
            "session-1",
            &format!("message {}", i),
            start + Duration::minutes(i),
        )
        .await?;
    }
    insert_message(db, &user.id, "session-2", "other", Utc::now()).await?;

    let messages = ChatRepository::new(db)
        .recent_for_session(&user.id, "session-1", 3)
        .await?;

    let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, vec!["message 3", "message 4", "message 5"]);

    Ok(())
}

/// Tests the history listing with and without a session filter.
///
/// Verifies that another user's messages never appear.
///
/// Expected: 3 messages across sessions, 1 for session-2
#[tokio::test]
async fn history_filters_by_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Chat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_customer(db).await?;
    let other = factory::create_customer(db).await?;
    let now = Utc::now();
    insert_message(db, &user.id, "session-1", "a", now - Duration::minutes(3)).await?;
    insert_message(db, &user.id, "session-1", "b", now - Duration::minutes(2)).await?;
    insert_message(db, &user.id, "session-2", "c", now - Duration::minutes(1)).await?;
    insert_message(db, &other.id, "session-1", "x", now).await?;

    let repo = ChatRepository::new(db);
    let all = repo.history(&user.id, None).await?;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].message, "a");

    let session = repo.history(&user.id, Some("session-2")).await?;
    assert_eq!(session.len(), 1);
    assert_eq!(session[0].message, "c");

    Ok(())
}
