use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::{
    cafe::{Cafe, CafeFilter, CreateCafeParams, UpdateCafeParams},
    page::{PageRequest, Paginated},
};

pub const STATUS_ACTIVE: &str = "active";

pub struct CafeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CafeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a cafe that starts open, active and unverified with no ratings.
    pub async fn create(&self, params: CreateCafeParams) -> Result<Cafe, DbErr> {
        let now = Utc::now();
        let cafe = entity::cafe::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            owner_id: ActiveValue::Set(params.owner_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            logo_url: ActiveValue::Set(params.logo_url),
            cover_image_url: ActiveValue::Set(params.cover_image_url),
            address: ActiveValue::Set(params.address),
            city: ActiveValue::Set(params.city),
            province: ActiveValue::Set(params.province),
            postal_code: ActiveValue::Set(params.postal_code),
            phone: ActiveValue::Set(params.phone),
            email: ActiveValue::Set(params.email),
            website: ActiveValue::Set(params.website),
            coordinate_lat: ActiveValue::Set(params.coordinate_lat),
            coordinate_lng: ActiveValue::Set(params.coordinate_lng),
            business_hours: ActiveValue::Set(params.business_hours),
            is_open: ActiveValue::Set(true),
            is_verified: ActiveValue::Set(false),
            rating_average: ActiveValue::Set(0.0),
            rating_count: ActiveValue::Set(0),
            tax_percentage: ActiveValue::Set(params.tax_percentage),
            service_charge_percentage: ActiveValue::Set(params.service_charge_percentage),
            delivery_fee: ActiveValue::Set(params.delivery_fee),
            min_order_amount: ActiveValue::Set(params.min_order_amount),
            max_delivery_distance: ActiveValue::Set(params.max_delivery_distance),
            features: ActiveValue::Set(params.features),
            status: ActiveValue::Set(STATUS_ACTIVE.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(Cafe::from_entity(cafe))
    }

    /// Finds a non-deleted cafe by ID regardless of status.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Cafe>, DbErr> {
        Ok(self.find_model(id).await?.map(Cafe::from_entity))
    }

    /// Finds a non-deleted cafe with `status = active`.
    pub async fn find_active_by_id(&self, id: &str) -> Result<Option<Cafe>, DbErr> {
        let cafe = entity::prelude::Cafe::find_by_id(id.to_string())
            .filter(entity::cafe::Column::DeletedAt.is_null())
            .filter(entity::cafe::Column::Status.eq(STATUS_ACTIVE))
            .one(self.db)
            .await?;

        Ok(cafe.map(Cafe::from_entity))
    }

    /// Finds the cafe owned by a user. Owners have at most one cafe.
    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Option<Cafe>, DbErr> {
        let cafe = entity::prelude::Cafe::find()
            .filter(entity::cafe::Column::OwnerId.eq(owner_id))
            .filter(entity::cafe::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(cafe.map(Cafe::from_entity))
    }

    /// Lists active cafes, best rated first, then newest.
    pub async fn list(
        &self,
        filter: CafeFilter,
        page: PageRequest,
    ) -> Result<Paginated<Cafe>, DbErr> {
        let mut query = entity::prelude::Cafe::find()
            .filter(entity::cafe::Column::DeletedAt.is_null())
            .filter(entity::cafe::Column::Status.eq(STATUS_ACTIVE));

        if let Some(search) = filter.search.filter(|s| !s.trim().is_empty()) {
            let search = search.trim().to_string();
            query = query.filter(
                Condition::any()
                    .add(entity::cafe::Column::Name.contains(&search))
                    .add(entity::cafe::Column::Description.contains(&search)),
            );
        }
        if let Some(city) = filter.city.filter(|c| !c.trim().is_empty()) {
            query = query.filter(entity::cafe::Column::City.eq(city));
        }
        if let Some(is_open) = filter.is_open {
            query = query.filter(entity::cafe::Column::IsOpen.eq(is_open));
        }

        let paginator = query
            .order_by_desc(entity::cafe::Column::RatingAverage)
            .order_by_desc(entity::cafe::Column::CreatedAt)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let cafes = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Cafe::from_entity)
            .collect();

        Ok(Paginated::new(cafes, total, page))
    }

    /// Ids of active cafes that are currently open.
    pub async fn open_cafe_ids(&self) -> Result<Vec<String>, DbErr> {
        let cafes = entity::prelude::Cafe::find()
            .filter(entity::cafe::Column::DeletedAt.is_null())
            .filter(entity::cafe::Column::Status.eq(STATUS_ACTIVE))
            .filter(entity::cafe::Column::IsOpen.eq(true))
            .all(self.db)
            .await?;

        Ok(cafes.into_iter().map(|c| c.id).collect())
    }

    /// Maps cafe IDs to names, skipping IDs that don't exist.
    pub async fn names_by_ids(&self, ids: Vec<String>) -> Result<HashMap<String, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cafes = entity::prelude::Cafe::find()
            .filter(entity::cafe::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(cafes.into_iter().map(|c| (c.id, c.name)).collect())
    }

    /// Applies a partial update. `None` fields are left unchanged.
    pub async fn update(&self, id: &str, params: UpdateCafeParams) -> Result<Option<Cafe>, DbErr> {
        let Some(cafe) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: entity::cafe::ActiveModel = cafe.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(v) = params.description {
            active.description = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.logo_url {
            active.logo_url = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.cover_image_url {
            active.cover_image_url = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.address {
            active.address = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.city {
            active.city = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.province {
            active.province = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.postal_code {
            active.postal_code = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.phone {
            active.phone = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.email {
            active.email = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.website {
            active.website = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.coordinate_lat {
            active.coordinate_lat = ActiveValue::Set(v);
        }
        if let Some(v) = params.coordinate_lng {
            active.coordinate_lng = ActiveValue::Set(v);
        }
        if let Some(v) = params.business_hours {
            active.business_hours = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.tax_percentage {
            active.tax_percentage = ActiveValue::Set(v);
        }
        if let Some(v) = params.service_charge_percentage {
            active.service_charge_percentage = ActiveValue::Set(v);
        }
        if let Some(v) = params.delivery_fee {
            active.delivery_fee = ActiveValue::Set(v);
        }
        if let Some(v) = params.min_order_amount {
            active.min_order_amount = ActiveValue::Set(v);
        }
        if let Some(v) = params.max_delivery_distance {
            active.max_delivery_distance = ActiveValue::Set(v);
        }
        if let Some(v) = params.features {
            active.features = ActiveValue::Set(Some(v));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Cafe::from_entity(active.update(self.db).await?)))
    }

    pub async fn set_open(&self, id: &str, is_open: bool) -> Result<Option<Cafe>, DbErr> {
        let Some(cafe) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: entity::cafe::ActiveModel = cafe.into();
        active.is_open = ActiveValue::Set(is_open);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Cafe::from_entity(active.update(self.db).await?)))
    }

    pub async fn update_rating(&self, id: &str, average: f64, count: i32) -> Result<(), DbErr> {
        let Some(cafe) = self.find_model(id).await? else {
            return Err(DbErr::RecordNotFound(format!("Cafe {} not found", id)));
        };

        let mut active: entity::cafe::ActiveModel = cafe.into();
        active.rating_average = ActiveValue::Set(average);
        active.rating_count = ActiveValue::Set(count);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    async fn find_model(&self, id: &str) -> Result<Option<entity::cafe::Model>, DbErr> {
        entity::prelude::Cafe::find_by_id(id.to_string())
            .filter(entity::cafe::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }
}
