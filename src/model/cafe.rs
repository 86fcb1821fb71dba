use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CafeDto {
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

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct CreateCafeDto {
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
    pub coordinate_lat: Option<f64>,
    pub coordinate_lng: Option<f64>,
    pub business_hours: Option<String>,
    pub tax_percentage: Option<f64>,
    pub service_charge_percentage: Option<f64>,
    pub delivery_fee: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub max_delivery_distance: Option<f64>,
    pub features: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct UpdateCafeDto {
    pub name: Option<String>,
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
    pub coordinate_lat: Option<f64>,
    pub coordinate_lng: Option<f64>,
    pub business_hours: Option<String>,
    pub tax_percentage: Option<f64>,
    pub service_charge_percentage: Option<f64>,
    pub delivery_fee: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub max_delivery_distance: Option<f64>,
    pub features: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CafeListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Case-insensitive match on name or description
    pub search: Option<String>,
    pub city: Option<String>,
    pub is_open: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ReviewerDto {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ReviewDto {
    pub id: String,
    pub cafe_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_verified: bool,
    pub user: Option<ReviewerDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreateReviewDto {
    /// 1 to 5
    pub rating: i32,
    pub comment: Option<String>,
}
