use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub cafe_id: String,
    pub user_id: String,
    #[sea_orm(unique)]
    pub order_number: String,
    pub status: String,
    pub total_amount: f64,
    pub subtotal_amount: f64,
    pub tax_amount: f64,
    pub service_charge: f64,
    pub delivery_fee: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub order_type: String,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub completed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
