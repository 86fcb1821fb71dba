use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stock_movement")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub inventory_id: String,
    pub cafe_id: String,
    pub movement_type: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub balance_after: f64,
    pub reason: String,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
    pub performed_by: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
