//! User domain models and parameters.
//!
//! Users are either customers, who order and collect loyalty points, or cafe owners,
//! who manage a single cafe with its menu, inventory and loyalty program.

use chrono::{DateTime, Utc};

use crate::model::user::UserDto;

/// Account role carried in the bearer token and checked by the auth guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Owner,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(Self::Customer),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Owner => "owner",
        }
    }
}

/// An active (not soft-deleted) user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// Unknown role strings are treated as customers, the least privileged role.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            role: Role::parse(&entity.role).unwrap_or(Role::Customer),
            phone: entity.phone,
            address: entity.address,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role.as_str().to_string(),
            phone: self.phone,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}

/// Parameters for inserting a new user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: crate::model::user::UpdateProfileDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            address: dto.address,
        }
    }
}
