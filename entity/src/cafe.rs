use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
