//! Registration, login and token refresh.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{
        auth::{AuthSession, RegisterParams},
        user::{CreateUserParams, User},
    },
    util::{
        password::{hash_password, verify_password},
        token::JwtKeys,
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    keys: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, keys: &'a JwtKeys) -> Self {
        Self { db, keys }
    }

    /// Creates an account and signs the new user in.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Account created and token issued
    /// - `Err(AuthError::EmailTaken)` - Another active user holds the email
    pub async fn register(&self, params: RegisterParams) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.email_in_use(&params.email, None).await? {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = hash_password(&params.password)?;
        let user = user_repo
            .create(CreateUserParams {
                name: params.name,
                email: params.email,
                password_hash,
                role: params.role,
                phone: params.phone,
                address: params.address,
            })
            .await?;

        tracing::info!("Registered {} account {}", user.role.as_str(), user.id);

        self.issue(user)
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown emails and wrong passwords fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);
        let email = email.trim().to_lowercase();

        let Some((user, password_hash)) = user_repo.find_credentials_by_email(&email).await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &password_hash) {
            tracing::debug!("Failed login for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issue(user)
    }

    /// Issues a fresh token for an already authenticated user.
    pub fn refresh(&self, user: User) -> Result<AuthSession, AppError> {
        self.issue(user)
    }

    fn issue(&self, user: User) -> Result<AuthSession, AppError> {
        let (token, expires_at) = self.keys.issue(&user.id, user.role.as_str())?;

        Ok(AuthSession {
            token,
            user,
            expires_at,
        })
    }
}
