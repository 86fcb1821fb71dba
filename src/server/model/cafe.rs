//! Cafe and review domain models.

use chrono::{DateTime, Utc};

use crate::model::{
    cafe::{CafeDto, CreateCafeDto, ReviewDto, ReviewerDto, UpdateCafeDto},
    user::FavoriteDto,
};

pub const DEFAULT_TAX_PERCENTAGE: f64 = 10.0;
pub const DEFAULT_MAX_DELIVERY_DISTANCE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Cafe {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub coordinate_lat: f64,
    pub coordinate_lng: f64,
    pub business_hours: Option<String>,
    pub is_open: bool,
    pub is_verified: bool,
    pub rating_average: f64,
    pub rating_count: i32,
    pub tax_percentage: f64,
    pub service_charge_percentage: f64,
    pub delivery_fee: f64,
    pub min_order_amount: f64,
    pub max_delivery_distance: f64,
    pub features: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cafe {
    pub fn from_entity(entity: entity::cafe::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            description: entity.description,
            logo_url: entity.logo_url,
            cover_image_url: entity.cover_image_url,
            address: entity.address,
            city: entity.city,
            province: entity.province,
            postal_code: entity.postal_code,
            phone: entity.phone,
            email: entity.email,
            website: entity.website,
            coordinate_lat: entity.coordinate_lat,
            coordinate_lng: entity.coordinate_lng,
            business_hours: entity.business_hours,
            is_open: entity.is_open,
            is_verified: entity.is_verified,
            rating_average: entity.rating_average,
            rating_count: entity.rating_count,
            tax_percentage: entity.tax_percentage,
            service_charge_percentage: entity.service_charge_percentage,
            delivery_fee: entity.delivery_fee,
            min_order_amount: entity.min_order_amount,
            max_delivery_distance: entity.max_delivery_distance,
            features: entity.features,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CafeDto {
        CafeDto {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            logo_url: self.logo_url,
            cover_image_url: self.cover_image_url,
            address: self.address,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
            phone: self.phone,
            email: self.email,
            website: self.website,
            coordinate_lat: self.coordinate_lat,
            coordinate_lng: self.coordinate_lng,
            business_hours: self.business_hours,
            is_open: self.is_open,
            is_verified: self.is_verified,
            rating_average: self.rating_average,
            rating_count: self.rating_count,
            tax_percentage: self.tax_percentage,
            service_charge_percentage: self.service_charge_percentage,
            delivery_fee: self.delivery_fee,
            min_order_amount: self.min_order_amount,
            max_delivery_distance: self.max_delivery_distance,
            features: self.features,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Filters for the public cafe listing. Only active cafes are ever listed.
#[derive(Debug, Clone, Default)]
pub struct CafeFilter {
    /// Substring matched against name or description
    pub search: Option<String>,
    pub city: Option<String>,
    pub is_open: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CreateCafeParams {
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub coordinate_lat: f64,
    pub coordinate_lng: f64,
    pub business_hours: Option<String>,
    pub tax_percentage: f64,
    pub service_charge_percentage: f64,
    pub delivery_fee: f64,
    pub min_order_amount: f64,
    pub max_delivery_distance: f64,
    pub features: Option<String>,
}

impl CreateCafeParams {
    pub fn from_dto(owner_id: String, dto: CreateCafeDto) -> Self {
        Self {
            owner_id,
            name: dto.name.trim().to_string(),
            description: dto.description,
            logo_url: dto.logo_url,
            cover_image_url: dto.cover_image_url,
            address: dto.address,
            city: dto.city,
            province: dto.province,
            postal_code: dto.postal_code,
            phone: dto.phone,
            email: dto.email,
            website: dto.website,
            coordinate_lat: dto.coordinate_lat.unwrap_or_default(),
            coordinate_lng: dto.coordinate_lng.unwrap_or_default(),
            business_hours: dto.business_hours,
            tax_percentage: dto.tax_percentage.unwrap_or(DEFAULT_TAX_PERCENTAGE),
            service_charge_percentage: dto.service_charge_percentage.unwrap_or_default(),
            delivery_fee: dto.delivery_fee.unwrap_or_default(),
            min_order_amount: dto.min_order_amount.unwrap_or_default(),
            max_delivery_distance: dto
                .max_delivery_distance
                .unwrap_or(DEFAULT_MAX_DELIVERY_DISTANCE),
            features: dto.features,
        }
    }
}

/// Partial cafe update. `None` leaves a field unchanged.
pub type UpdateCafeParams = UpdateCafeDto;

/// A review together with the reviewer's public identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub cafe_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_verified: bool,
    /// Reviewer id and name; absent when the reviewer was deleted
    pub reviewer: Option<(String, String)>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(
        entity: entity::cafe_review::Model,
        reviewer: Option<entity::user::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            cafe_id: entity.cafe_id,
            rating: entity.rating,
            comment: entity.comment,
            is_verified: entity.is_verified,
            reviewer: reviewer.map(|u| (u.id, u.name)),
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            cafe_id: self.cafe_id,
            rating: self.rating,
            comment: self.comment,
            is_verified: self.is_verified,
            user: self.reviewer.map(|(id, name)| ReviewerDto { id, name }),
            created_at: self.created_at,
        }
    }
}

/// A cafe the user marked as favorite.
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub id: String,
    pub cafe: Cafe,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn from_entity(entity: entity::favorite::Model, cafe: Cafe) -> Self {
        Self {
            id: entity.id,
            cafe,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> FavoriteDto {
        FavoriteDto {
            id: self.id,
            cafe: self.cafe.into_dto(),
            created_at: self.created_at,
        }
    }
}

/// Name and contact details used by the concierge persona and as the receipt
/// header when an order's cafe is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct CafeInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl CafeInfo {
    pub fn from_cafe(cafe: &Cafe) -> Self {
        Self {
            name: cafe.name.clone(),
            address: cafe.address.clone().unwrap_or_default(),
            phone: cafe.phone.clone().unwrap_or_default(),
        }
    }
}

/// Average rating rounded to one decimal place; zero when there are no ratings.
pub fn rating_average(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i32 = ratings.iter().sum();
    let avg = sum as f64 / ratings.len() as f64;
    (avg * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::rating_average;

    #[test]
    fn rounds_average_to_one_decimal() {
        assert_eq!(rating_average(&[]), 0.0);
        assert_eq!(rating_average(&[5]), 5.0);
        assert_eq!(rating_average(&[5, 4, 4]), 4.3);
        assert_eq!(rating_average(&[1, 2]), 1.5);
    }
}
