use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "menu")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
