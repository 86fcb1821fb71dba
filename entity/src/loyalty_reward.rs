use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loyalty_reward")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub program_id: String,
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub reward_type: String,
    pub points_cost: i32,
    pub discount_value: f64,
    pub discount_type: Option<String>,
    pub free_item_id: Option<String>,
    pub min_order_value: f64,
    pub max_uses: i32,
    pub current_uses: i32,
    pub is_active: bool,
    pub valid_from: Option<DateTimeUtc>,
    pub valid_until: Option<DateTimeUtc>,
    pub conditions: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
