use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::cafe::CafeDto;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's profile; owners also get their cafe.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProfileDto {
    #[serde(flatten)]
    pub user: UserDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cafe: Option<CafeDto>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DeleteAccountDto {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct FavoriteDto {
    pub id: String,
    pub cafe: CafeDto,
    pub created_at: DateTime<Utc>,
}
