//! User factory for creating test user entities.

use crate::factory::helpers::{new_uuid, next_id};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Placeholder stored when a test does not need to log in as the user.
const UNUSABLE_PASSWORD_HASH: &str = "!unusable";

/// Factory for creating test users with customizable fields.
///
/// Password hashing is skipped unless `password()` is called, keeping tests that never
/// authenticate fast.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .email("budi@example.com")
///     .password("secret123")
///     .role("owner")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    phone: Option<String>,
    address: Option<String>,
}

impl<'a, C: ConnectionTrait> UserFactory<'a, C> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - name: `"User {id}"` where id is auto-incremented
    /// - email: `"user{id}@example.com"`
    /// - role: `"customer"`
    /// - password: unusable
    pub fn new(db: &'a C) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            password_hash: UNUSABLE_PASSWORD_HASH.to_string(),
            role: "customer".to_string(),
            phone: None,
            address: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Hashes `password` with Argon2 so the user can log in with it.
    pub fn password(mut self, password: &str) -> Self {
        let salt = SaltString::generate(&mut OsRng);
        if let Ok(hash) = Argon2::default().hash_password(password.as_bytes(), &salt) {
            self.password_hash = hash.to_string();
        }
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            role: ActiveValue::Set(self.role),
            phone: ActiveValue::Set(self.phone),
            address: ActiveValue::Set(self.address),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a customer with default values.
pub async fn create_user<C: ConnectionTrait>(db: &C) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a customer with default values.
pub async fn create_customer<C: ConnectionTrait>(db: &C) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("customer").build().await
}

/// Creates an owner with default values.
pub async fn create_owner<C: ConnectionTrait>(db: &C) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("owner").build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(!user.id.is_empty());
        assert!(user.email.ends_with("@example.com"));
        assert_eq!(user.role, "customer");
        assert!(user.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_owner_with_hashed_password() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = UserFactory::new(db)
            .role("owner")
            .password("secret123")
            .build()
            .await?;

        assert_eq!(user.role, "owner");
        assert!(user.password_hash.starts_with("$argon2"));

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user1 = create_user(db).await?;
        let user2 = create_user(db).await?;

        assert_ne!(user1.id, user2.id);
        assert_ne!(user1.email, user2.email);

        Ok(())
    }
}
