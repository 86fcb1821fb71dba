//! Registration input and issued sessions.

use chrono::{DateTime, Utc};

use crate::{
    model::auth::{AuthResponseDto, RegisterDto},
    server::model::user::{Role, User},
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Validated registration input; the password is still plain text here.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl RegisterParams {
    /// Validates a registration request.
    ///
    /// # Returns
    /// - `Ok(RegisterParams)` - Input is well formed; role defaults to customer
    /// - `Err(String)` - Message describing the first validation failure
    pub fn from_dto(dto: RegisterDto) -> Result<Self, String> {
        let name = dto.name.trim().to_string();
        let email = dto.email.trim().to_lowercase();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        if email.is_empty() || !email.contains('@') {
            return Err("A valid email is required".to_string());
        }
        validate_password(&dto.password)?;

        let role = match dto.role.as_deref().filter(|r| !r.is_empty()) {
            None => Role::Customer,
            Some(value) => Role::parse(value)
                .ok_or_else(|| "Role must be customer or owner".to_string())?,
        };

        Ok(Self {
            name,
            email,
            password: dto.password,
            role,
            phone: dto.phone,
            address: dto.address,
        })
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// A freshly issued bearer token for a user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn into_dto(self) -> AuthResponseDto {
        AuthResponseDto {
            token: self.token,
            user: self.user.into_dto(),
            expires_at: self.expires_at,
        }
    }
}
