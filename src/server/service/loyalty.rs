//! Loyalty programs, membership, rewards, redemption and point awards.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    model::loyalty::{CreateLoyaltyProgramDto, CreateLoyaltyRewardDto},
    server::{
        data::loyalty::{
            member::LoyaltyMemberRepository,
            member_reward::MemberRewardRepository,
            program::LoyaltyProgramRepository,
            reward::LoyaltyRewardRepository,
            transaction::{LoyaltyTransactionRepository, TYPE_EARNED, TYPE_REDEEMED},
        },
        error::AppError,
        model::{
            loyalty::{
                points_for_amount, CreateProgramParams, CreateRewardParams, LoyaltyMember,
                LoyaltyProgram, LoyaltyReward, LoyaltyTransaction, MemberReward,
                RecordTransactionParams, Redemption, Tier, REDEEMED_REWARD_DAYS,
            },
            page::{PageRequest, Paginated},
        },
        service::cafe::CafeService,
    },
};

pub struct LoyaltyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LoyaltyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts the loyalty program of the owner's cafe. A cafe has at most one program.
    pub async fn create_program(
        &self,
        owner_id: &str,
        dto: CreateLoyaltyProgramDto,
    ) -> Result<LoyaltyProgram, AppError> {
        let cafe = CafeService::new(self.db).owned(owner_id).await?;
        let program_repo = LoyaltyProgramRepository::new(self.db);

        if program_repo.exists_for_cafe(&cafe.id).await? {
            return Err(AppError::BadRequest(
                "Cafe already has a loyalty program".to_string(),
            ));
        }

        let params =
            CreateProgramParams::from_dto(cafe.id, dto).map_err(AppError::BadRequest)?;
        let program = program_repo.create(params).await?;
        tracing::info!("Loyalty program {} created for cafe {}", program.id, program.cafe_id);

        Ok(program)
    }

    pub async fn program_for_cafe(&self, cafe_id: &str) -> Result<LoyaltyProgram, AppError> {
        LoyaltyProgramRepository::new(self.db)
            .find_active_by_cafe(cafe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loyalty program not found".to_string()))
    }

    /// Enrolls the user in the cafe's active program as a bronze member.
    pub async fn join(&self, cafe_id: &str, user_id: &str) -> Result<LoyaltyMember, AppError> {
        let program = self.program_for_cafe(cafe_id).await?;
        let member_repo = LoyaltyMemberRepository::new(self.db);

        if member_repo.find(&program.id, user_id).await?.is_some() {
            return Err(AppError::BadRequest(
                "Already a member of this loyalty program".to_string(),
            ));
        }

        Ok(member_repo.create(&program, user_id).await?)
    }

    /// Adds a reward to the owner's active program.
    pub async fn create_reward(
        &self,
        owner_id: &str,
        dto: CreateLoyaltyRewardDto,
    ) -> Result<LoyaltyReward, AppError> {
        let params = CreateRewardParams::from_dto(dto).map_err(AppError::BadRequest)?;
        let cafe = CafeService::new(self.db).owned(owner_id).await?;
        let program = self.program_for_cafe(&cafe.id).await?;

        Ok(LoyaltyRewardRepository::new(self.db)
            .create(&program, params)
            .await?)
    }

    /// Active rewards of a cafe, cheapest first.
    pub async fn rewards_for_cafe(&self, cafe_id: &str) -> Result<Vec<LoyaltyReward>, AppError> {
        Ok(LoyaltyRewardRepository::new(self.db)
            .list_active_for_cafe(cafe_id)
            .await?)
    }

    /// Exchanges member points for a reward.
    ///
    /// Every write (member balance, issued reward, ledger entry and use counter) happens
    /// in one transaction; any failure leaves nothing behind.
    ///
    /// # Returns
    /// - `Ok(Redemption)` - Reward issued and points deducted
    /// - `Err(AppError::NotFound)` - Reward does not exist
    /// - `Err(AppError::BadRequest)` - Reward inactive, outside its validity window, used up,
    ///   or the member has insufficient points
    /// - `Err(AppError::Forbidden)` - Caller is not a member of the reward's program
    pub async fn redeem(
        &self,
        user_id: &str,
        reward_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Redemption, AppError> {
        let txn = self.db.begin().await?;
        let reward_repo = LoyaltyRewardRepository::new(&txn);
        let member_repo = LoyaltyMemberRepository::new(&txn);

        let Some(reward) = reward_repo.find_by_id(reward_id).await? else {
            return Err(AppError::NotFound("Reward not found".to_string()));
        };
        if !reward.is_active || !reward.is_valid_at(now) {
            return Err(AppError::BadRequest("Reward is not available".to_string()));
        }
        if reward.uses_exhausted() {
            return Err(AppError::BadRequest(
                "Reward has reached its usage limit".to_string(),
            ));
        }

        let Some(mut member) = member_repo.find(&reward.program_id, user_id).await? else {
            return Err(AppError::Forbidden(
                "You are not a member of this loyalty program".to_string(),
            ));
        };
        if member.current_points < reward.points_cost {
            return Err(AppError::BadRequest("Insufficient points".to_string()));
        }

        member.current_points -= reward.points_cost;
        member.total_redeemed = member.total_redeemed.saturating_add(reward.points_cost);
        let member = member_repo.save_points(&member, now).await?;

        let expires_at = reward
            .valid_until
            .unwrap_or(now + Duration::days(REDEEMED_REWARD_DAYS));
        let member_reward = MemberRewardRepository::new(&txn)
            .create(&member, &reward, expires_at, now)
            .await?;

        LoyaltyTransactionRepository::new(&txn)
            .create(
                RecordTransactionParams {
                    program_id: reward.program_id.clone(),
                    member_id: member.id.clone(),
                    cafe_id: reward.cafe_id.clone(),
                    order_id: None,
                    transaction_type: TYPE_REDEEMED.to_string(),
                    points: -reward.points_cost,
                    balance_after: member.current_points,
                    description: format!("Redeemed reward: {}", reward.name),
                    reference_id: Some(member_reward.id.clone()),
                },
                now,
            )
            .await?;

        reward_repo.increment_uses(&reward.id).await?;

        txn.commit().await?;

        tracing::info!(
            "Member {} redeemed reward {} for {} points",
            member.id,
            reward.id,
            reward.points_cost
        );

        Ok(Redemption {
            member_reward,
            points_spent: reward.points_cost,
            remaining_points: member.current_points,
        })
    }

    /// Rewards issued to the user across all memberships, newest first.
    pub async fn member_rewards(&self, user_id: &str) -> Result<Vec<MemberReward>, AppError> {
        let members = LoyaltyMemberRepository::new(self.db)
            .list_for_user(user_id)
            .await?;
        let member_ids = members.into_iter().map(|m| m.id).collect();

        Ok(MemberRewardRepository::new(self.db)
            .list_for_members(member_ids)
            .await?)
    }

    /// The user's ledger in one cafe, newest first.
    pub async fn transactions(
        &self,
        user_id: &str,
        cafe_id: &str,
        page: PageRequest,
    ) -> Result<Paginated<LoyaltyTransaction>, AppError> {
        let member = LoyaltyMemberRepository::new(self.db)
            .find_by_cafe(cafe_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loyalty membership not found".to_string()))?;

        Ok(LoyaltyTransactionRepository::new(self.db)
            .list_for_member(&member.id, page)
            .await?)
    }
}

/// Credits points for a completed order to the customer's membership in the cafe.
///
/// Runs on the caller's connection so order completion and the award commit together.
/// Nothing is written when the cafe has no active program, the customer is not a member,
/// or the order earns no points.
///
/// # Returns
/// - `Ok(Some(LoyaltyTransaction))` - Points awarded and recorded
/// - `Ok(None)` - No award applies
pub async fn award_points<C: ConnectionTrait>(
    db: &C,
    cafe_id: &str,
    user_id: &str,
    order_id: &str,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<Option<LoyaltyTransaction>, DbErr> {
    let Some(program) = LoyaltyProgramRepository::new(db)
        .find_active_by_cafe(cafe_id)
        .await?
    else {
        return Ok(None);
    };

    let member_repo = LoyaltyMemberRepository::new(db);
    let Some(mut member) = member_repo.find(&program.id, user_id).await? else {
        return Ok(None);
    };

    let points = points_for_amount(
        amount,
        program.points_per_currency,
        program.min_order_for_points,
    );
    if points <= 0 {
        return Ok(None);
    }

    member.current_points = member.current_points.saturating_add(points);
    member.total_earned = member.total_earned.saturating_add(points);
    member.member_tier = Tier::for_points(member.total_earned).as_str().to_string();
    let member = member_repo.save_points(&member, now).await?;

    let transaction = LoyaltyTransactionRepository::new(db)
        .create(
            RecordTransactionParams {
                program_id: program.id,
                member_id: member.id.clone(),
                cafe_id: cafe_id.to_string(),
                order_id: Some(order_id.to_string()),
                transaction_type: TYPE_EARNED.to_string(),
                points,
                balance_after: member.current_points,
                description: "Points earned from order".to_string(),
                reference_id: None,
            },
            now,
        )
        .await?;

    tracing::info!(
        "Awarded {} points to member {} for order {}",
        points,
        member.id,
        order_id
    );

    Ok(Some(transaction))
}
