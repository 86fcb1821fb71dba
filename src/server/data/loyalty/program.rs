use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::server::model::loyalty::{CreateProgramParams, LoyaltyProgram};

pub struct LoyaltyProgramRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LoyaltyProgramRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateProgramParams) -> Result<LoyaltyProgram, DbErr> {
        let now = Utc::now();
        let program = entity::loyalty_program::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            cafe_id: ActiveValue::Set(params.cafe_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            points_per_currency: ActiveValue::Set(params.points_per_currency),
            currency_per_point: ActiveValue::Set(params.currency_per_point),
            min_order_for_points: ActiveValue::Set(params.min_order_for_points),
            points_expiry_months: ActiveValue::Set(params.points_expiry_months),
            is_active: ActiveValue::Set(true),
            tier_rules: ActiveValue::Set(params.tier_rules),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(LoyaltyProgram::from_entity(program))
    }

    /// Whether the cafe has any program, active or not.
    pub async fn exists_for_cafe(&self, cafe_id: &str) -> Result<bool, DbErr> {
        let program = entity::prelude::LoyaltyProgram::find()
            .filter(entity::loyalty_program::Column::CafeId.eq(cafe_id))
            .one(self.db)
            .await?;

        Ok(program.is_some())
    }

    pub async fn find_active_by_cafe(&self, cafe_id: &str) -> Result<Option<LoyaltyProgram>, DbErr> {
        let program = entity::prelude::LoyaltyProgram::find()
            .filter(entity::loyalty_program::Column::CafeId.eq(cafe_id))
            .filter(entity::loyalty_program::Column::IsActive.eq(true))
            .one(self.db)
            .await?;

        Ok(program.map(LoyaltyProgram::from_entity))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<LoyaltyProgram>, DbErr> {
        let program = entity::prelude::LoyaltyProgram::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        Ok(program.map(LoyaltyProgram::from_entity))
    }
}
