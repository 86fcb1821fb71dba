use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{Role, User},
    util::token::JwtKeys,
};

pub enum Permission {
    Owner,
    Customer,
}

/// Resolves the caller from a bearer token and checks role permissions.
///
/// Handlers construct the guard per request and call `require` with the permissions the
/// endpoint needs; an empty slice only requires a valid token.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    keys: &'a JwtKeys,
    credential: Credential,
}

/// What the request carried in place of a token.
enum Credential {
    Missing,
    /// Header present but not `Bearer <token>`.
    Malformed,
    Bearer(String),
}

impl<'a> AuthGuard<'a> {
    /// Reads the token from the `Authorization: Bearer <jwt>` header.
    pub fn new(db: &'a DatabaseConnection, keys: &'a JwtKeys, headers: &HeaderMap) -> Self {
        let credential = match headers.get(AUTHORIZATION) {
            None => Credential::Missing,
            Some(value) => value
                .to_str()
                .ok()
                .and_then(bearer_token)
                .map_or(Credential::Malformed, |token| {
                    Credential::Bearer(token.to_string())
                }),
        };

        Self {
            db,
            keys,
            credential,
        }
    }

    /// Uses a token passed out of band, e.g. as a WebSocket query parameter.
    pub fn with_token(
        db: &'a DatabaseConnection,
        keys: &'a JwtKeys,
        token: Option<&str>,
    ) -> Self {
        let credential = match token.filter(|t| !t.is_empty()) {
            Some(token) => Credential::Bearer(token.to_string()),
            None => Credential::Missing,
        };

        Self {
            db,
            keys,
            credential,
        }
    }

    /// Authenticates the caller and checks every listed permission.
    ///
    /// # Returns
    /// - `Ok(User)` - Token valid, user active, all permissions held
    /// - `Err(AuthError::MissingToken)` - No `Authorization` header or token supplied
    /// - `Err(AuthError::InvalidToken)` - Not a bearer header, bad signature, malformed or
    ///   expired token
    /// - `Err(AuthError::UserNotFound)` - Token names a missing or deleted user
    /// - `Err(AuthError::AccessDenied)` - Role does not match a required permission
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let token = match &self.credential {
            Credential::Missing => return Err(AuthError::MissingToken.into()),
            Credential::Malformed => {
                return Err(AuthError::InvalidToken(
                    "Authorization header is not a bearer token".to_string(),
                )
                .into())
            }
            Credential::Bearer(token) => token.as_str(),
        };

        let claims = self.keys.verify(token)?;

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_id(&claims.user_id).await? else {
            return Err(AuthError::UserNotFound(claims.user_id).into());
        };

        for permission in permissions {
            let (role, action) = match permission {
                Permission::Owner => (Role::Owner, "owner-only endpoint"),
                Permission::Customer => (Role::Customer, "customer-only endpoint"),
            };
            if user.role != role {
                return Err(AuthError::AccessDenied(user.id.clone(), action.to_string()).into());
            }
        }

        Ok(user)
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
