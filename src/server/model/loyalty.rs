//! Loyalty programs, members, tiers, rewards and the points ledger.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::loyalty::{
    CreateLoyaltyProgramDto, CreateLoyaltyRewardDto, LoyaltyMemberDto, LoyaltyProgramDto,
    LoyaltyRewardDto, LoyaltyTransactionDto, MemberRewardDto, MembershipDto, RedeemRewardDto,
};

/// Days a redeemed reward stays usable when the reward itself has no end date.
pub const REDEEMED_REWARD_DAYS: i64 = 30;

/// Membership tiers, ordered by total points earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Tier reached with the given lifetime points.
    pub fn for_points(total_earned: i32) -> Self {
        match total_earned {
            p if p >= 2000 => Self::Platinum,
            p if p >= 1000 => Self::Gold,
            p if p >= 500 => Self::Silver,
            _ => Self::Bronze,
        }
    }

    /// The next tier and the lifetime points needed to reach it.
    pub fn next(&self) -> Option<(Tier, i32)> {
        match self {
            Self::Bronze => Some((Self::Silver, 500)),
            Self::Silver => Some((Self::Gold, 1000)),
            Self::Gold => Some((Self::Platinum, 2000)),
            Self::Platinum => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

/// Points earned for an order amount, or zero when the order is below the program minimum.
pub fn points_for_amount(amount: f64, points_per_currency: f64, min_order: f64) -> i32 {
    if amount < min_order {
        return 0;
    }
    (amount * points_per_currency).floor().max(0.0) as i32
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyProgram {
    pub id: String,
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub points_per_currency: f64,
    pub currency_per_point: f64,
    pub min_order_for_points: f64,
    pub points_expiry_months: i32,
    pub is_active: bool,
    pub tier_rules: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LoyaltyProgram {
    pub fn from_entity(entity: entity::loyalty_program::Model) -> Self {
        Self {
            id: entity.id,
            cafe_id: entity.cafe_id,
            name: entity.name,
            description: entity.description,
            points_per_currency: entity.points_per_currency,
            currency_per_point: entity.currency_per_point,
            min_order_for_points: entity.min_order_for_points,
            points_expiry_months: entity.points_expiry_months,
            is_active: entity.is_active,
            tier_rules: entity.tier_rules,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> LoyaltyProgramDto {
        LoyaltyProgramDto {
            id: self.id,
            cafe_id: self.cafe_id,
            name: self.name,
            description: self.description,
            points_per_currency: self.points_per_currency,
            currency_per_point: self.currency_per_point,
            min_order_for_points: self.min_order_for_points,
            points_expiry_months: self.points_expiry_months,
            is_active: self.is_active,
            tier_rules: self.tier_rules,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateProgramParams {
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub points_per_currency: f64,
    pub currency_per_point: f64,
    pub min_order_for_points: f64,
    pub points_expiry_months: i32,
    pub tier_rules: Option<String>,
}

impl CreateProgramParams {
    pub fn from_dto(cafe_id: String, dto: CreateLoyaltyProgramDto) -> Result<Self, String> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err("Program name is required".to_string());
        }
        if dto.points_per_currency <= 0.0 || dto.currency_per_point <= 0.0 {
            return Err("Point conversion rates must be greater than zero".to_string());
        }
        if dto.min_order_for_points < 0.0 {
            return Err("Minimum order for points cannot be negative".to_string());
        }
        if !(1..=60).contains(&dto.points_expiry_months) {
            return Err("Points expiry must be between 1 and 60 months".to_string());
        }

        Ok(Self {
            cafe_id,
            name,
            description: dto.description,
            points_per_currency: dto.points_per_currency,
            currency_per_point: dto.currency_per_point,
            min_order_for_points: dto.min_order_for_points,
            points_expiry_months: dto.points_expiry_months,
            tier_rules: dto.tier_rules,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyMember {
    pub id: String,
    pub program_id: String,
    pub user_id: String,
    pub cafe_id: String,
    pub current_points: i32,
    pub total_earned: i32,
    pub total_redeemed: i32,
    pub member_tier: String,
    pub joined_at: DateTime<Utc>,
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl LoyaltyMember {
    pub fn from_entity(entity: entity::loyalty_member::Model) -> Self {
        Self {
            id: entity.id,
            program_id: entity.program_id,
            user_id: entity.user_id,
            cafe_id: entity.cafe_id,
            current_points: entity.current_points,
            total_earned: entity.total_earned,
            total_redeemed: entity.total_redeemed,
            member_tier: entity.member_tier,
            joined_at: entity.joined_at,
            last_activity_at: entity.last_activity_at,
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::parse(&self.member_tier).unwrap_or_else(|| Tier::for_points(self.total_earned))
    }

    pub fn into_dto(self) -> LoyaltyMemberDto {
        LoyaltyMemberDto {
            id: self.id,
            program_id: self.program_id,
            user_id: self.user_id,
            cafe_id: self.cafe_id,
            current_points: self.current_points,
            total_earned: self.total_earned,
            total_redeemed: self.total_redeemed,
            member_tier: self.member_tier,
            joined_at: self.joined_at,
            last_activity_at: self.last_activity_at,
        }
    }
}

/// A membership with its program and cafe names, as listed on the customer's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub member: LoyaltyMember,
    pub program_name: String,
    pub cafe_name: String,
}

impl Membership {
    pub fn into_dto(self) -> MembershipDto {
        let next = self.member.tier().next();
        let points_to_next_tier = next
            .map(|(_, threshold)| (threshold - self.member.total_earned).max(0))
            .unwrap_or(0);

        MembershipDto {
            member: self.member.into_dto(),
            program_name: self.program_name,
            cafe_name: self.cafe_name,
            next_tier: next.map(|(tier, _)| tier.as_str().to_string()),
            points_to_next_tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyReward {
    pub id: String,
    pub program_id: String,
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub reward_type: String,
    pub points_cost: i32,
    pub discount_value: f64,
    pub discount_type: Option<String>,
    pub free_item_id: Option<String>,
    pub min_order_value: f64,
    pub max_uses: i32,
    pub current_uses: i32,
    pub is_active: bool,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub conditions: Option<String>,
}

impl LoyaltyReward {
    pub fn from_entity(entity: entity::loyalty_reward::Model) -> Self {
        Self {
            id: entity.id,
            program_id: entity.program_id,
            cafe_id: entity.cafe_id,
            name: entity.name,
            description: entity.description,
            reward_type: entity.reward_type,
            points_cost: entity.points_cost,
            discount_value: entity.discount_value,
            discount_type: entity.discount_type,
            free_item_id: entity.free_item_id,
            min_order_value: entity.min_order_value,
            max_uses: entity.max_uses,
            current_uses: entity.current_uses,
            is_active: entity.is_active,
            valid_from: entity.valid_from,
            valid_until: entity.valid_until,
            conditions: entity.conditions,
        }
    }

    /// Whether `now` falls inside the optional validity window.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_from.is_none_or(|from| now >= from)
            && self.valid_until.is_none_or(|until| now <= until)
    }

    /// Zero or negative `max_uses` means unlimited.
    pub fn uses_exhausted(&self) -> bool {
        self.max_uses > 0 && self.current_uses >= self.max_uses
    }

    pub fn is_available_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.uses_exhausted() && self.is_valid_at(now)
    }

    pub fn into_dto(self, now: DateTime<Utc>) -> LoyaltyRewardDto {
        let is_available = self.is_available_at(now);
        LoyaltyRewardDto {
            id: self.id,
            program_id: self.program_id,
            cafe_id: self.cafe_id,
            name: self.name,
            description: self.description,
            reward_type: self.reward_type,
            points_cost: self.points_cost,
            discount_value: self.discount_value,
            discount_type: self.discount_type,
            free_item_id: self.free_item_id,
            min_order_value: self.min_order_value,
            max_uses: self.max_uses,
            current_uses: self.current_uses,
            is_active: self.is_active,
            is_available,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            conditions: self.conditions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRewardParams {
    pub name: String,
    pub reward_type: String,
    pub points_cost: i32,
    pub description: Option<String>,
    pub discount_value: f64,
    pub discount_type: Option<String>,
    pub free_item_id: Option<String>,
    pub min_order_value: f64,
    pub max_uses: i32,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub conditions: Option<String>,
}

impl CreateRewardParams {
    pub fn from_dto(dto: CreateLoyaltyRewardDto) -> Result<Self, String> {
        let name = dto.name.trim().to_string();
        let reward_type = dto.reward_type.trim().to_string();
        if name.is_empty() || reward_type.is_empty() {
            return Err("Reward name and type are required".to_string());
        }
        if dto.points_cost < 1 {
            return Err("Points cost must be at least 1".to_string());
        }

        Ok(Self {
            name,
            reward_type,
            points_cost: dto.points_cost,
            description: dto.description,
            discount_value: dto.discount_value.unwrap_or_default(),
            discount_type: dto.discount_type,
            free_item_id: dto.free_item_id,
            min_order_value: dto.min_order_value.unwrap_or_default(),
            max_uses: dto.max_uses.unwrap_or_default(),
            valid_from: dto.valid_from.as_deref().map(parse_date).transpose()?,
            valid_until: dto.valid_until.as_deref().map(parse_date).transpose()?,
            conditions: dto.conditions,
        })
    }
}

/// Parses `YYYY-MM-DD` as midnight UTC.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberReward {
    pub id: String,
    pub member_id: String,
    pub reward_id: String,
    pub reward_name: Option<String>,
    pub cafe_id: String,
    pub order_id: Option<String>,
    pub status: String,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MemberReward {
    pub fn from_entity(entity: entity::member_reward::Model, reward_name: Option<String>) -> Self {
        Self {
            id: entity.id,
            member_id: entity.member_id,
            reward_id: entity.reward_id,
            reward_name,
            cafe_id: entity.cafe_id,
            order_id: entity.order_id,
            status: entity.status,
            used_at: entity.used_at,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> MemberRewardDto {
        MemberRewardDto {
            id: self.id,
            member_id: self.member_id,
            reward_id: self.reward_id,
            reward_name: self.reward_name,
            cafe_id: self.cafe_id,
            order_id: self.order_id,
            status: self.status,
            used_at: self.used_at,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

/// Outcome of a successful redemption.
#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    pub member_reward: MemberReward,
    pub points_spent: i32,
    pub remaining_points: i32,
}

impl Redemption {
    pub fn into_dto(self) -> RedeemRewardDto {
        RedeemRewardDto {
            member_reward: self.member_reward.into_dto(),
            points_spent: self.points_spent,
            remaining_points: self.remaining_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyTransaction {
    pub id: String,
    pub program_id: String,
    pub member_id: String,
    pub cafe_id: String,
    pub order_id: Option<String>,
    pub transaction_type: String,
    pub points: i32,
    pub balance_after: i32,
    pub description: String,
    pub reference_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LoyaltyTransaction {
    pub fn from_entity(entity: entity::loyalty_transaction::Model) -> Self {
        Self {
            id: entity.id,
            program_id: entity.program_id,
            member_id: entity.member_id,
            cafe_id: entity.cafe_id,
            order_id: entity.order_id,
            transaction_type: entity.transaction_type,
            points: entity.points,
            balance_after: entity.balance_after,
            description: entity.description,
            reference_id: entity.reference_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> LoyaltyTransactionDto {
        LoyaltyTransactionDto {
            id: self.id,
            program_id: self.program_id,
            member_id: self.member_id,
            cafe_id: self.cafe_id,
            order_id: self.order_id,
            transaction_type: self.transaction_type,
            points: self.points,
            balance_after: self.balance_after,
            description: self.description,
            reference_id: self.reference_id,
            created_at: self.created_at,
        }
    }
}

/// A ledger entry to append for a member.
#[derive(Debug, Clone)]
pub struct RecordTransactionParams {
    pub program_id: String,
    pub member_id: String,
    pub cafe_id: String,
    pub order_id: Option<String>,
    pub transaction_type: String,
    pub points: i32,
    pub balance_after: i32,
    pub description: String,
    pub reference_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn tiers_follow_lifetime_points() {
        assert_eq!(Tier::for_points(0), Tier::Bronze);
        assert_eq!(Tier::for_points(499), Tier::Bronze);
        assert_eq!(Tier::for_points(500), Tier::Silver);
        assert_eq!(Tier::for_points(1000), Tier::Gold);
        assert_eq!(Tier::for_points(2500), Tier::Platinum);
        assert_eq!(Tier::Gold.next(), Some((Tier::Platinum, 2000)));
        assert_eq!(Tier::Platinum.next(), None);
    }

    #[test]
    fn points_respect_minimum_order() {
        assert_eq!(points_for_amount(50_000.0, 0.001, 0.0), 50);
        assert_eq!(points_for_amount(1_999.0, 0.001, 0.0), 1);
        assert_eq!(points_for_amount(10_000.0, 0.001, 20_000.0), 0);
    }

    #[test]
    fn parses_calendar_dates() {
        let date = parse_date("2025-03-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert!(parse_date("01/03/2025").is_err());
    }

    fn reward(max_uses: i32, current_uses: i32) -> LoyaltyReward {
        LoyaltyReward {
            id: "r".to_string(),
            program_id: "p".to_string(),
            cafe_id: "c".to_string(),
            name: "Free Espresso".to_string(),
            description: None,
            reward_type: "free_item".to_string(),
            points_cost: 150,
            discount_value: 0.0,
            discount_type: None,
            free_item_id: None,
            min_order_value: 0.0,
            max_uses,
            current_uses,
            is_active: true,
            valid_from: None,
            valid_until: None,
            conditions: None,
        }
    }

    #[test]
    fn reward_availability_checks_uses_and_window() {
        let now = Utc::now();
        assert!(reward(0, 999).is_available_at(now));
        assert!(reward(5, 4).is_available_at(now));
        assert!(!reward(5, 5).is_available_at(now));

        let mut expired = reward(0, 0);
        expired.valid_until = Some(now - Duration::days(1));
        assert!(!expired.is_available_at(now));

        let mut upcoming = reward(0, 0);
        upcoming.valid_from = Some(now + Duration::days(1));
        assert!(!upcoming.is_available_at(now));
    }

    #[test]
    fn membership_reports_next_tier() {
        let now = Utc::now();
        let membership = Membership {
            member: LoyaltyMember {
                id: "m".to_string(),
                program_id: "p".to_string(),
                user_id: "u".to_string(),
                cafe_id: "c".to_string(),
                current_points: 300,
                total_earned: 620,
                total_redeemed: 320,
                member_tier: "silver".to_string(),
                joined_at: now,
                last_activity_at: None,
            },
            program_name: "Rewards".to_string(),
            cafe_name: "Cafe".to_string(),
        };

        let dto = membership.into_dto();
        assert_eq!(dto.next_tier.as_deref(), Some("gold"));
        assert_eq!(dto.points_to_next_tier, 380);
    }
}
