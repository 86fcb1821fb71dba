//! Cafe factory for creating test cafe entities.

use crate::factory::helpers::{new_uuid, next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating test cafes with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::cafe::CafeFactory;
///
/// let cafe = CafeFactory::new(&db, &owner.id)
///     .name("Kopi Senja")
///     .city("Bandung")
///     .is_open(false)
///     .build()
///     .await?;
/// ```
pub struct CafeFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    owner_id: String,
    name: String,
    description: Option<String>,
    city: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    is_open: bool,
    rating_average: f64,
    status: String,
}

impl<'a, C: ConnectionTrait> CafeFactory<'a, C> {
    /// Creates a new CafeFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Cafe {id}"` where id is auto-incremented
    /// - city: `Some("Jakarta")`
    /// - is_open: `true`
    /// - status: `"active"`
    pub fn new(db: &'a C, owner_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id: owner_id.into(),
            name: format!("Cafe {}", id),
            description: Some("Test cafe description".to_string()),
            city: Some("Jakarta".to_string()),
            phone: Some("+62 811-0000-0000".to_string()),
            address: Some("Jl. Test No. 1".to_string()),
            is_open: true,
            rating_average: 0.0,
            status: "active".to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn is_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn rating_average(mut self, rating_average: f64) -> Self {
        self.rating_average = rating_average;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the cafe entity into the database.
    pub async fn build(self) -> Result<entity::cafe::Model, DbErr> {
        let now = Utc::now();
        entity::cafe::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            logo_url: ActiveValue::Set(None),
            cover_image_url: ActiveValue::Set(None),
            address: ActiveValue::Set(self.address),
            city: ActiveValue::Set(self.city),
            province: ActiveValue::Set(None),
            postal_code: ActiveValue::Set(None),
            phone: ActiveValue::Set(self.phone),
            email: ActiveValue::Set(None),
            website: ActiveValue::Set(None),
            coordinate_lat: ActiveValue::Set(0.0),
            coordinate_lng: ActiveValue::Set(0.0),
            business_hours: ActiveValue::Set(None),
            is_open: ActiveValue::Set(self.is_open),
            is_verified: ActiveValue::Set(false),
            rating_average: ActiveValue::Set(self.rating_average),
            rating_count: ActiveValue::Set(0),
            tax_percentage: ActiveValue::Set(10.0),
            service_charge_percentage: ActiveValue::Set(0.0),
            delivery_fee: ActiveValue::Set(0.0),
            min_order_amount: ActiveValue::Set(0.0),
            max_delivery_distance: ActiveValue::Set(5.0),
            features: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open, active cafe owned by `owner_id`.
pub async fn create_cafe<C: ConnectionTrait>(
    db: &C,
    owner_id: &str,
) -> Result<entity::cafe::Model, DbErr> {
    CafeFactory::new(db, owner_id).build().await
}
