use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::loyalty::{LoyaltyMember, LoyaltyReward, MemberReward};

pub const STATUS_AVAILABLE: &str = "available";

pub struct MemberRewardRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MemberRewardRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Issues a redeemed reward to a member.
    pub async fn create(
        &self,
        member: &LoyaltyMember,
        reward: &LoyaltyReward,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<MemberReward, DbErr> {
        let issued = entity::member_reward::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            member_id: ActiveValue::Set(member.id.clone()),
            reward_id: ActiveValue::Set(reward.id.clone()),
            program_id: ActiveValue::Set(reward.program_id.clone()),
            cafe_id: ActiveValue::Set(reward.cafe_id.clone()),
            order_id: ActiveValue::Set(None),
            status: ActiveValue::Set(STATUS_AVAILABLE.to_string()),
            used_at: ActiveValue::Set(None),
            expires_at: ActiveValue::Set(Some(expires_at)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(MemberReward::from_entity(issued, Some(reward.name.clone())))
    }

    /// Rewards held by any of the given memberships, newest first, with reward names.
    pub async fn list_for_members(&self, member_ids: Vec<String>) -> Result<Vec<MemberReward>, DbErr> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        let issued = entity::prelude::MemberReward::find()
            .filter(entity::member_reward::Column::MemberId.is_in(member_ids))
            .order_by_desc(entity::member_reward::Column::CreatedAt)
            .all(self.db)
            .await?;

        let reward_ids: Vec<String> = issued.iter().map(|r| r.reward_id.clone()).collect();
        let names: HashMap<String, String> = if reward_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::LoyaltyReward::find()
                .filter(entity::loyalty_reward::Column::Id.is_in(reward_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|r| (r.id, r.name))
                .collect()
        };

        Ok(issued
            .into_iter()
            .map(|r| {
                let name = names.get(&r.reward_id).cloned();
                MemberReward::from_entity(r, name)
            })
            .collect())
    }
}
