use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::loyalty::{LoyaltyMember, LoyaltyProgram, Tier};

pub struct LoyaltyMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LoyaltyMemberRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Enrolls a user as a bronze member with no points.
    pub async fn create(
        &self,
        program: &LoyaltyProgram,
        user_id: &str,
    ) -> Result<LoyaltyMember, DbErr> {
        let now = Utc::now();
        let member = entity::loyalty_member::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            program_id: ActiveValue::Set(program.id.clone()),
            user_id: ActiveValue::Set(user_id.to_string()),
            cafe_id: ActiveValue::Set(program.cafe_id.clone()),
            current_points: ActiveValue::Set(0),
            total_earned: ActiveValue::Set(0),
            total_redeemed: ActiveValue::Set(0),
            member_tier: ActiveValue::Set(Tier::Bronze.as_str().to_string()),
            joined_at: ActiveValue::Set(now),
            last_activity_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(LoyaltyMember::from_entity(member))
    }

    pub async fn find(
        &self,
        program_id: &str,
        user_id: &str,
    ) -> Result<Option<LoyaltyMember>, DbErr> {
        let member = entity::prelude::LoyaltyMember::find()
            .filter(entity::loyalty_member::Column::ProgramId.eq(program_id))
            .filter(entity::loyalty_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(member.map(LoyaltyMember::from_entity))
    }

    pub async fn find_by_cafe(
        &self,
        cafe_id: &str,
        user_id: &str,
    ) -> Result<Option<LoyaltyMember>, DbErr> {
        let member = entity::prelude::LoyaltyMember::find()
            .filter(entity::loyalty_member::Column::CafeId.eq(cafe_id))
            .filter(entity::loyalty_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(member.map(LoyaltyMember::from_entity))
    }

    /// All memberships of a user, oldest first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<LoyaltyMember>, DbErr> {
        let members = entity::prelude::LoyaltyMember::find()
            .filter(entity::loyalty_member::Column::UserId.eq(user_id))
            .order_by_asc(entity::loyalty_member::Column::JoinedAt)
            .all(self.db)
            .await?;

        Ok(members.into_iter().map(LoyaltyMember::from_entity).collect())
    }

    /// Persists new point balances and tier, stamping activity at `now`.
    pub async fn save_points(
        &self,
        member: &LoyaltyMember,
        now: DateTime<Utc>,
    ) -> Result<LoyaltyMember, DbErr> {
        let Some(model) = entity::prelude::LoyaltyMember::find_by_id(member.id.clone())
            .one(self.db)
            .await?
        else {
            return Err(DbErr::RecordNotFound(format!(
                "Loyalty member {} not found",
                member.id
            )));
        };

        let mut active: entity::loyalty_member::ActiveModel = model.into();
        active.current_points = ActiveValue::Set(member.current_points);
        active.total_earned = ActiveValue::Set(member.total_earned);
        active.total_redeemed = ActiveValue::Set(member.total_redeemed);
        active.member_tier = ActiveValue::Set(member.member_tier.clone());
        active.last_activity_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);

        Ok(LoyaltyMember::from_entity(active.update(self.db).await?))
    }
}
