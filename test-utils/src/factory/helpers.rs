//! Shared helper utilities for factory methods.
//!
//! Provides ID generation and convenience methods for creating entities together
//! with their dependencies.

use sea_orm::{ConnectionTrait, DbErr};

/// Counter for generating unique names and emails in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Generates a fresh UUID string for use as a primary key.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creates an owner and the cafe they own.
///
/// # Returns
/// - `Ok((owner, cafe))` - The created owner and cafe
/// - `Err(DbErr)` - Database error during creation
pub async fn create_cafe_with_owner<C: ConnectionTrait>(
    db: &C,
) -> Result<(entity::user::Model, entity::cafe::Model), DbErr> {
    let owner = crate::factory::user::create_owner(db).await?;
    let cafe = crate::factory::cafe::create_cafe(db, &owner.id).await?;

    Ok((owner, cafe))
}

/// Creates an owner, their cafe and one available menu item priced at 25000.
///
/// # Returns
/// - `Ok((owner, cafe, menu))` - The created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_menu_with_dependencies<C: ConnectionTrait>(
    db: &C,
) -> Result<
    (
        entity::user::Model,
        entity::cafe::Model,
        entity::menu::Model,
    ),
    DbErr,
> {
    let (owner, cafe) = create_cafe_with_owner(db).await?;
    let menu = crate::factory::menu::create_menu(db, &cafe.id).await?;

    Ok((owner, cafe, menu))
}
