use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::loyalty::{CreateRewardParams, LoyaltyProgram, LoyaltyReward};

pub struct LoyaltyRewardRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LoyaltyRewardRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        program: &LoyaltyProgram,
        params: CreateRewardParams,
    ) -> Result<LoyaltyReward, DbErr> {
        let now = Utc::now();
        let reward = entity::loyalty_reward::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            program_id: ActiveValue::Set(program.id.clone()),
            cafe_id: ActiveValue::Set(program.cafe_id.clone()),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            reward_type: ActiveValue::Set(params.reward_type),
            points_cost: ActiveValue::Set(params.points_cost),
            discount_value: ActiveValue::Set(params.discount_value),
            discount_type: ActiveValue::Set(params.discount_type),
            free_item_id: ActiveValue::Set(params.free_item_id),
            min_order_value: ActiveValue::Set(params.min_order_value),
            max_uses: ActiveValue::Set(params.max_uses),
            current_uses: ActiveValue::Set(0),
            is_active: ActiveValue::Set(true),
            valid_from: ActiveValue::Set(params.valid_from),
            valid_until: ActiveValue::Set(params.valid_until),
            conditions: ActiveValue::Set(params.conditions),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(LoyaltyReward::from_entity(reward))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<LoyaltyReward>, DbErr> {
        let reward = entity::prelude::LoyaltyReward::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        Ok(reward.map(LoyaltyReward::from_entity))
    }

    /// Active rewards of a cafe, cheapest first.
    pub async fn list_active_for_cafe(&self, cafe_id: &str) -> Result<Vec<LoyaltyReward>, DbErr> {
        let rewards = entity::prelude::LoyaltyReward::find()
            .filter(entity::loyalty_reward::Column::CafeId.eq(cafe_id))
            .filter(entity::loyalty_reward::Column::IsActive.eq(true))
            .order_by_asc(entity::loyalty_reward::Column::PointsCost)
            .all(self.db)
            .await?;

        Ok(rewards.into_iter().map(LoyaltyReward::from_entity).collect())
    }

    /// Counts one more redemption of the reward.
    pub async fn increment_uses(&self, id: &str) -> Result<LoyaltyReward, DbErr> {
        let Some(reward) = entity::prelude::LoyaltyReward::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Err(DbErr::RecordNotFound(format!("Reward {} not found", id)));
        };

        let uses = reward.current_uses + 1;
        let mut active: entity::loyalty_reward::ActiveModel = reward.into();
        active.current_uses = ActiveValue::Set(uses);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(LoyaltyReward::from_entity(active.update(self.db).await?))
    }
}
