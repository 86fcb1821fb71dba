//! Menu domain models and the static menu category list.

use chrono::{DateTime, Utc};

use crate::model::menu::{CreateMenuDto, MenuCategoryDto, MenuDto, UpdateMenuDto};

pub const DEFAULT_PREP_TIME: i32 = 5;

/// Category ids and display names offered to clients.
pub const MENU_CATEGORIES: [(&str, &str); 5] = [
    ("coffee", "Coffee"),
    ("tea", "Tea"),
    ("food", "Food"),
    ("dessert", "Dessert"),
    ("juice", "Juice"),
];

pub fn categories() -> Vec<MenuCategoryDto> {
    MENU_CATEGORIES
        .iter()
        .map(|(id, name)| MenuCategoryDto {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
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

impl Menu {
    pub fn from_entity(entity: entity::menu::Model) -> Self {
        Self {
            id: entity.id,
            cafe_id: entity.cafe_id,
            name: entity.name,
            description: entity.description,
            category: entity.category,
            price: entity.price,
            image_url: entity.image_url,
            is_available: entity.is_available,
            ingredients: entity.ingredients,
            prep_time: entity.prep_time,
            is_popular: entity.is_popular,
            is_recommended: entity.is_recommended,
            calories: entity.calories,
            allergens: entity.allergens,
            customizable: entity.customizable,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> MenuDto {
        MenuDto {
            id: self.id,
            cafe_id: self.cafe_id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            image_url: self.image_url,
            is_available: self.is_available,
            ingredients: self.ingredients,
            prep_time: self.prep_time,
            is_popular: self.is_popular,
            is_recommended: self.is_recommended,
            calories: self.calories,
            allergens: self.allergens,
            customizable: self.customizable,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMenuParams {
    pub cafe_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub prep_time: i32,
    pub calories: i32,
    pub allergens: Option<String>,
    pub is_popular: bool,
    pub is_recommended: bool,
    pub customizable: bool,
}

impl CreateMenuParams {
    pub fn from_dto(cafe_id: String, dto: CreateMenuDto) -> Self {
        Self {
            cafe_id,
            name: dto.name.trim().to_string(),
            category: dto.category.trim().to_string(),
            price: dto.price,
            description: dto.description,
            image_url: dto.image_url,
            ingredients: dto.ingredients,
            prep_time: dto.prep_time.unwrap_or(DEFAULT_PREP_TIME),
            calories: dto.calories.unwrap_or_default(),
            allergens: dto.allergens,
            is_popular: dto.is_popular.unwrap_or(false),
            is_recommended: dto.is_recommended.unwrap_or(false),
            customizable: dto.customizable.unwrap_or(false),
        }
    }
}

/// Partial menu update. `None` leaves a field unchanged.
pub type UpdateMenuParams = UpdateMenuDto;
