use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StatusCountDto {
    pub status: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PopularItemDto {
    pub menu_id: String,
    pub menu_name: String,
    pub quantity: i64,
    pub revenue: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DailyStatDto {
    /// YYYY-MM-DD
    pub date: String,
    pub orders: u64,
    pub revenue: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PeriodDto {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AnalyticsDto {
    pub period: PeriodDto,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub orders_by_status: Vec<StatusCountDto>,
    pub popular_items: Vec<PopularItemDto>,
    pub daily_stats: Vec<DailyStatDto>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// YYYY-MM-DD, defaults to 30 days ago
    pub start_date: Option<String>,
    /// YYYY-MM-DD, defaults to today
    pub end_date: Option<String>,
}
