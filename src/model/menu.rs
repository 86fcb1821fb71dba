use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MenuDto {
    pub id: String,
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub ingredients: Option<String>,
    pub prep_time: i32,
    pub is_popular: bool,
    pub is_recommended: bool,
    pub calories: i32,
    pub allergens: Option<String>,
    pub customizable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct CreateMenuDto {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub prep_time: Option<i32>,
    pub calories: Option<i32>,
    pub allergens: Option<String>,
    pub is_popular: Option<bool>,
    pub is_recommended: Option<bool>,
    pub customizable: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct UpdateMenuDto {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub ingredients: Option<String>,
    pub prep_time: Option<i32>,
    pub calories: Option<i32>,
    pub allergens: Option<String>,
    pub is_popular: Option<bool>,
    pub is_recommended: Option<bool>,
    pub customizable: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MenuCategoryDto {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuListQuery {
    pub category: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuSearchQuery {
    /// Search term, required
    pub q: Option<String>,
    pub cafe_id: Option<String>,
}
