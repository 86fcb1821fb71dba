use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoyaltyProgramDto {
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

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct CreateLoyaltyProgramDto {
    pub name: String,
    pub description: Option<String>,
    pub points_per_currency: f64,
    pub currency_per_point: f64,
    #[serde(default)]
    pub min_order_for_points: f64,
    pub points_expiry_months: i32,
    pub tier_rules: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoyaltyMemberDto {
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

/// A membership as seen from the member's side.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MembershipDto {
    #[serde(flatten)]
    pub member: LoyaltyMemberDto,
    pub program_name: String,
    pub cafe_name: String,
    pub next_tier: Option<String>,
    pub points_to_next_tier: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoyaltyRewardDto {
    pub id: String,
    pub program_id: String,
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub reward_type: String,
    pub points_cost: i32,
    pub discount_value: f64,
    pub discount_type: Option<String>,
    pub free_item_id: Option<String>,
    pub min_order_value: f64,
    pub max_uses: i32,
    pub current_uses: i32,
    pub is_active: bool,
    pub is_available: bool,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub conditions: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct CreateLoyaltyRewardDto {
    pub name: String,
    #[serde(rename = "type")]
    pub reward_type: String,
    pub points_cost: i32,
    pub description: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_type: Option<String>,
    pub free_item_id: Option<String>,
    pub min_order_value: Option<f64>,
    /// Zero or negative means unlimited
    pub max_uses: Option<i32>,
    /// YYYY-MM-DD
    pub valid_from: Option<String>,
    /// YYYY-MM-DD
    pub valid_until: Option<String>,
    pub conditions: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MemberRewardDto {
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

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RedeemRewardDto {
    pub member_reward: MemberRewardDto,
    pub points_spent: i32,
    pub remaining_points: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoyaltyTransactionDto {
    pub id: String,
    pub program_id: String,
    pub member_id: String,
    pub cafe_id: String,
    pub order_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub points: i32,
    pub balance_after: i32,
    pub description: String,
    pub reference_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
