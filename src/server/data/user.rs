use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::server::model::user::{CreateUserParams, UpdateProfileParams, User};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Insert failed, including unique email violations
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let user = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            phone: ActiveValue::Set(params.phone),
            address: ActiveValue::Set(params.address),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(user))
    }

    /// Finds an active user by ID. Soft-deleted users are never returned.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, DbErr> {
        Ok(self.find_active(id).await?.map(User::from_entity))
    }

    /// Finds an active user by email together with their password hash.
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, DbErr> {
        let user = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .filter(entity::user::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(user.map(|u| {
            let hash = u.password_hash.clone();
            (User::from_entity(u), hash)
        }))
    }

    /// Returns the stored password hash of an active user.
    pub async fn find_password_hash(&self, id: &str) -> Result<Option<String>, DbErr> {
        Ok(self.find_active(id).await?.map(|u| u.password_hash))
    }

    /// Checks whether an email is held by an active user other than `except_id`.
    pub async fn email_in_use(&self, email: &str, except_id: Option<&str>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .filter(entity::user::Column::DeletedAt.is_null());

        if let Some(id) = except_id {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No active user with that ID
    pub async fn update_profile(
        &self,
        id: &str,
        params: UpdateProfileParams,
    ) -> Result<Option<User>, DbErr> {
        let Some(user) = self.find_active(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = user.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(address) = params.address {
            active.address = ActiveValue::Set(Some(address));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(User::from_entity(active.update(self.db).await?)))
    }

    pub async fn update_password(&self, id: &str, password_hash: String) -> Result<(), DbErr> {
        let Some(user) = self.find_active(id).await? else {
            return Err(DbErr::RecordNotFound(format!("User {} not found", id)));
        };

        let mut active: entity::user::ActiveModel = user.into();
        active.password_hash = ActiveValue::Set(password_hash);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Marks the user deleted; they disappear from every query afterwards.
    ///
    /// The email is rewritten to `deleted+{id}+{email}` so the unique index no longer
    /// holds the address and it can be registered again.
    pub async fn soft_delete(&self, id: &str) -> Result<bool, DbErr> {
        let Some(user) = self.find_active(id).await? else {
            return Ok(false);
        };

        let now = Utc::now();
        let released_email = format!("deleted+{}+{}", user.id, user.email);
        let mut active: entity::user::ActiveModel = user.into();
        active.email = ActiveValue::Set(released_email);
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await?;

        Ok(true)
    }

    /// Counts all user rows, deleted or not.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    async fn find_active(&self, id: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id.to_string())
            .filter(entity::user::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }
}
