use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loyalty_program")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub points_per_currency: f64,
    pub currency_per_point: f64,
    pub min_order_for_points: f64,
    pub points_expiry_months: i32,
    pub is_active: bool,
    pub tier_rules: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
