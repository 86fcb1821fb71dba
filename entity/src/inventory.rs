use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit: String,
    pub current_stock: f64,
    pub min_stock_level: f64,
    pub max_stock_level: f64,
    pub unit_cost: f64,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub last_restocked: Option<DateTimeUtc>,
    pub expiry_date: Option<DateTimeUtc>,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
