//! Profile, password, account, favorites and loyalty memberships of the caller.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::ProfileDto,
    server::{
        data::{
            cafe::CafeRepository,
            favorite::FavoriteRepository,
            loyalty::{member::LoyaltyMemberRepository, program::LoyaltyProgramRepository},
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            auth::validate_password,
            cafe::{Cafe, Favorite},
            loyalty::Membership,
            user::{UpdateProfileParams, User},
        },
        util::password::{hash_password, verify_password},
    },
};

/// A user together with the cafe they own, if any.
pub struct Profile {
    pub user: User,
    pub cafe: Option<Cafe>,
}

impl Profile {
    pub fn into_dto(self) -> ProfileDto {
        ProfileDto {
            user: self.user.into_dto(),
            cafe: self.cafe.map(Cafe::into_dto),
        }
    }
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the caller's profile; owners get their cafe embedded.
    pub async fn profile(&self, user: User) -> Result<Profile, AppError> {
        let cafe = if user.is_owner() {
            CafeRepository::new(self.db).find_by_owner(&user.id).await?
        } else {
            None
        };

        Ok(Profile { user, cafe })
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Email empty, malformed or used by another user
    pub async fn update_profile(
        &self,
        user_id: &str,
        mut params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        if let Some(email) = params.email.take() {
            let email = email.trim().to_lowercase();
            if email.is_empty() || !email.contains('@') {
                return Err(AppError::BadRequest("A valid email is required".to_string()));
            }
            if user_repo.email_in_use(&email, Some(user_id)).await? {
                return Err(AppError::BadRequest("Email already in use".to_string()));
            }
            params.email = Some(email);
        }
        if params.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }

        user_repo
            .update_profile(user_id, params)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()).into())
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(password_hash) = user_repo.find_password_hash(user_id).await? else {
            return Err(AuthError::UserNotFound(user_id.to_string()).into());
        };
        if !verify_password(current_password, &password_hash) {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }
        validate_password(new_password).map_err(AppError::BadRequest)?;

        user_repo
            .update_password(user_id, hash_password(new_password)?)
            .await?;

        tracing::info!("User {} changed their password", user_id);

        Ok(())
    }

    /// Soft deletes the account after confirming the password.
    pub async fn delete_account(&self, user_id: &str, password: &str) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(password_hash) = user_repo.find_password_hash(user_id).await? else {
            return Err(AuthError::UserNotFound(user_id.to_string()).into());
        };
        if !verify_password(password, &password_hash) {
            return Err(AppError::BadRequest("Password is incorrect".to_string()));
        }

        user_repo.soft_delete(user_id).await?;
        tracing::info!("User {} deleted their account", user_id);

        Ok(())
    }

    pub async fn favorites(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        let favorites = FavoriteRepository::new(self.db)
            .list_for_user(user_id)
            .await?;

        Ok(favorites
            .into_iter()
            .map(|(favorite, cafe)| Favorite::from_entity(favorite, cafe))
            .collect())
    }

    /// Marks a cafe as favorite. Adding an existing favorite returns it unchanged.
    pub async fn add_favorite(&self, user_id: &str, cafe_id: &str) -> Result<Favorite, AppError> {
        let cafe = CafeRepository::new(self.db)
            .find_active_by_id(cafe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cafe not found".to_string()))?;

        let favorite = FavoriteRepository::new(self.db)
            .add(user_id, cafe_id)
            .await?;

        Ok(Favorite::from_entity(favorite, cafe))
    }

    pub async fn remove_favorite(&self, user_id: &str, cafe_id: &str) -> Result<(), AppError> {
        if !FavoriteRepository::new(self.db)
            .remove(user_id, cafe_id)
            .await?
        {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }

        Ok(())
    }

    /// Loyalty memberships of the user with program and cafe names.
    pub async fn memberships(&self, user_id: &str) -> Result<Vec<Membership>, AppError> {
        let members = LoyaltyMemberRepository::new(self.db)
            .list_for_user(user_id)
            .await?;

        let cafe_ids = members.iter().map(|m| m.cafe_id.clone()).collect();
        let cafe_names = CafeRepository::new(self.db).names_by_ids(cafe_ids).await?;

        let program_repo = LoyaltyProgramRepository::new(self.db);
        let mut memberships = Vec::with_capacity(members.len());
        for member in members {
            let program_name = program_repo
                .find_by_id(&member.program_id)
                .await?
                .map(|p| p.name)
                .unwrap_or_default();
            let cafe_name = cafe_names.get(&member.cafe_id).cloned().unwrap_or_default();

            memberships.push(Membership {
                member,
                program_name,
                cafe_name,
            });
        }

        Ok(memberships)
    }
}
