//! Loyalty factories for programs, members and rewards.

use crate::factory::helpers::{new_uuid, next_id};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating a cafe's loyalty program.
///
/// # Example
///
/// ```rust,ignore
/// let program = LoyaltyProgramFactory::new(&db, &cafe.id)
///     .points_per_currency(0.001)
///     .build()
///     .await?;
/// ```
pub struct LoyaltyProgramFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    cafe_id: String,
    name: String,
    points_per_currency: f64,
    min_order_for_points: f64,
    is_active: bool,
}

impl<'a, C: ConnectionTrait> LoyaltyProgramFactory<'a, C> {
    /// Creates a new factory for an active program earning 1 point per 1000 spent.
    pub fn new(db: &'a C, cafe_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            cafe_id: cafe_id.into(),
            name: format!("Rewards {}", id),
            points_per_currency: 0.001,
            min_order_for_points: 0.0,
            is_active: true,
        }
    }

    pub fn points_per_currency(mut self, points_per_currency: f64) -> Self {
        self.points_per_currency = points_per_currency;
        self
    }

    pub fn min_order_for_points(mut self, min_order_for_points: f64) -> Self {
        self.min_order_for_points = min_order_for_points;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the program.
    pub async fn build(self) -> Result<entity::loyalty_program::Model, DbErr> {
        let now = Utc::now();
        entity::loyalty_program::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            cafe_id: ActiveValue::Set(self.cafe_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            points_per_currency: ActiveValue::Set(self.points_per_currency),
            currency_per_point: ActiveValue::Set(1000.0),
            min_order_for_points: ActiveValue::Set(self.min_order_for_points),
            points_expiry_months: ActiveValue::Set(12),
            is_active: ActiveValue::Set(self.is_active),
            tier_rules: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Factory for enrolling a user into a program.
pub struct LoyaltyMemberFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    program: &'a entity::loyalty_program::Model,
    user_id: String,
    current_points: i32,
    total_earned: i32,
    member_tier: String,
}

impl<'a, C: ConnectionTrait> LoyaltyMemberFactory<'a, C> {
    /// Creates a new factory for a bronze member with no points.
    pub fn new(
        db: &'a C,
        program: &'a entity::loyalty_program::Model,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            db,
            program,
            user_id: user_id.into(),
            current_points: 0,
            total_earned: 0,
            member_tier: "bronze".to_string(),
        }
    }

    /// Sets both current points and lifetime earned points.
    pub fn points(mut self, points: i32) -> Self {
        self.current_points = points;
        self.total_earned = points;
        self
    }

    pub fn total_earned(mut self, total_earned: i32) -> Self {
        self.total_earned = total_earned;
        self
    }

    pub fn member_tier(mut self, member_tier: impl Into<String>) -> Self {
        self.member_tier = member_tier.into();
        self
    }

    /// Builds and inserts the membership.
    pub async fn build(self) -> Result<entity::loyalty_member::Model, DbErr> {
        let now = Utc::now();
        entity::loyalty_member::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            program_id: ActiveValue::Set(self.program.id.clone()),
            user_id: ActiveValue::Set(self.user_id),
            cafe_id: ActiveValue::Set(self.program.cafe_id.clone()),
            current_points: ActiveValue::Set(self.current_points),
            total_earned: ActiveValue::Set(self.total_earned),
            total_redeemed: ActiveValue::Set(0),
            member_tier: ActiveValue::Set(self.member_tier),
            joined_at: ActiveValue::Set(now),
            last_activity_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Factory for creating rewards in a program.
pub struct LoyaltyRewardFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    program: &'a entity::loyalty_program::Model,
    name: String,
    reward_type: String,
    points_cost: i32,
    max_uses: i32,
    current_uses: i32,
    is_active: bool,
    valid_from: Option<DateTime<Utc>>,
    valid_until: Option<DateTime<Utc>>,
}

impl<'a, C: ConnectionTrait> LoyaltyRewardFactory<'a, C> {
    /// Creates a new factory for an active, unlimited free-item reward costing 100 points.
    pub fn new(db: &'a C, program: &'a entity::loyalty_program::Model) -> Self {
        let id = next_id();
        Self {
            db,
            program,
            name: format!("Reward {}", id),
            reward_type: "free_item".to_string(),
            points_cost: 100,
            max_uses: 0,
            current_uses: 0,
            is_active: true,
            valid_from: None,
            valid_until: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn points_cost(mut self, points_cost: i32) -> Self {
        self.points_cost = points_cost;
        self
    }

    /// Sets the usage limit and how many times it has been used.
    pub fn uses(mut self, max_uses: i32, current_uses: i32) -> Self {
        self.max_uses = max_uses;
        self.current_uses = current_uses;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn valid_between(
        mut self,
        valid_from: Option<DateTime<Utc>>,
        valid_until: Option<DateTime<Utc>>,
    ) -> Self {
        self.valid_from = valid_from;
        self.valid_until = valid_until;
        self
    }

    /// Builds and inserts the reward.
    pub async fn build(self) -> Result<entity::loyalty_reward::Model, DbErr> {
        let now = Utc::now();
        entity::loyalty_reward::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            program_id: ActiveValue::Set(self.program.id.clone()),
            cafe_id: ActiveValue::Set(self.program.cafe_id.clone()),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            reward_type: ActiveValue::Set(self.reward_type),
            points_cost: ActiveValue::Set(self.points_cost),
            discount_value: ActiveValue::Set(0.0),
            discount_type: ActiveValue::Set(None),
            free_item_id: ActiveValue::Set(None),
            min_order_value: ActiveValue::Set(0.0),
            max_uses: ActiveValue::Set(self.max_uses),
            current_uses: ActiveValue::Set(self.current_uses),
            is_active: ActiveValue::Set(self.is_active),
            valid_from: ActiveValue::Set(self.valid_from),
            valid_until: ActiveValue::Set(self.valid_until),
            conditions: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}
