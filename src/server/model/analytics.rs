//! Order aggregation for cafe and platform dashboards.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::model::analytics::{
    AnalyticsDto, DailyStatDto, PeriodDto, PopularItemDto, StatusCountDto,
};

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const POPULAR_ITEMS_LIMIT: usize = 10;

/// An inclusive calendar-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The last `DEFAULT_WINDOW_DAYS` days ending on `today`.
    pub fn last_days(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(DEFAULT_WINDOW_DAYS),
            end: today,
        }
    }

    /// Window from optional `YYYY-MM-DD` bounds.
    ///
    /// A missing end is `today`; a missing start is `DEFAULT_WINDOW_DAYS` before the end.
    pub fn parse(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> Result<Self, String> {
        let parse = |value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .ok()
                .filter(|date| (1..=9999).contains(&date.year()))
                .ok_or_else(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
        };

        let end = match end.filter(|v| !v.trim().is_empty()) {
            Some(value) => parse(value)?,
            None => today,
        };
        let start = match start.filter(|v| !v.trim().is_empty()) {
            Some(value) => parse(value)?,
            None => end - Duration::days(DEFAULT_WINDOW_DAYS),
        };
        if start > end {
            return Err("start_date must not be after end_date".to_string());
        }

        Ok(Self { start, end })
    }

    /// First instant of the window.
    pub fn start_at(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant after the window.
    pub fn end_before(&self) -> DateTime<Utc> {
        (self.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc()
    }
}

/// One ordered line, joined with its menu name, inside the window.
#[derive(Debug, Clone)]
pub struct SoldItem {
    pub menu_id: String,
    pub menu_name: String,
    pub quantity: i32,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    pub range: DateRange,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub orders_by_status: Vec<StatusCountDto>,
    pub popular_items: Vec<PopularItemDto>,
    pub daily_stats: Vec<DailyStatDto>,
}

impl Analytics {
    /// Aggregates orders and their sold items.
    pub fn compute(range: DateRange, orders: &[entity::order::Model], items: &[SoldItem]) -> Self {
        let mut by_status: BTreeMap<&str, u64> = BTreeMap::new();
        let mut by_day: BTreeMap<NaiveDate, (u64, f64)> = BTreeMap::new();
        let mut total_revenue = 0.0;

        for order in orders {
            total_revenue += order.total_amount;
            *by_status.entry(order.status.as_str()).or_default() += 1;
            let day = by_day.entry(order.created_at.date_naive()).or_default();
            day.0 += 1;
            day.1 += order.total_amount;
        }

        let mut popular: HashMap<&str, PopularItemDto> = HashMap::new();
        for item in items {
            let entry = popular
                .entry(item.menu_id.as_str())
                .or_insert_with(|| PopularItemDto {
                    menu_id: item.menu_id.clone(),
                    menu_name: item.menu_name.clone(),
                    quantity: 0,
                    revenue: 0.0,
                });
            entry.quantity += i64::from(item.quantity);
            entry.revenue += item.total_price;
        }
        let mut popular_items: Vec<PopularItemDto> = popular.into_values().collect();
        popular_items.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then_with(|| a.menu_name.cmp(&b.menu_name))
        });
        popular_items.truncate(POPULAR_ITEMS_LIMIT);

        Self {
            range,
            total_orders: orders.len() as u64,
            total_revenue,
            orders_by_status: by_status
                .into_iter()
                .map(|(status, count)| StatusCountDto {
                    status: status.to_string(),
                    count,
                })
                .collect(),
            popular_items,
            daily_stats: by_day
                .into_iter()
                .rev()
                .map(|(date, (orders, revenue))| DailyStatDto {
                    date: date.format("%Y-%m-%d").to_string(),
                    orders,
                    revenue,
                })
                .collect(),
        }
    }

    pub fn into_dto(self) -> AnalyticsDto {
        AnalyticsDto {
            period: PeriodDto {
                start_date: self.range.start.format("%Y-%m-%d").to_string(),
                end_date: self.range.end.format("%Y-%m-%d").to_string(),
            },
            total_orders: self.total_orders,
            total_revenue: self.total_revenue,
            orders_by_status: self.orders_by_status,
            popular_items: self.popular_items,
            daily_stats: self.daily_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(status: &str, amount: f64, created_at: DateTime<Utc>) -> entity::order::Model {
        entity::order::Model {
            id: format!("{}-{}", status, created_at.timestamp()),
            cafe_id: "cafe-1".to_string(),
            user_id: "user-1".to_string(),
            order_number: format!("ORD-{}", created_at.timestamp()),
            status: status.to_string(),
            total_amount: amount,
            subtotal_amount: amount,
            tax_amount: 0.0,
            service_charge: 0.0,
            delivery_fee: 0.0,
            payment_method: "cash".to_string(),
            payment_status: "pending".to_string(),
            payment_id: None,
            customer_name: "Dewi".to_string(),
            customer_phone: None,
            order_type: "dine_in".to_string(),
            table_number: None,
            delivery_address: None,
            notes: None,
            completed_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn sold(menu_id: &str, name: &str, quantity: i32, total: f64) -> SoldItem {
        SoldItem {
            menu_id: menu_id.to_string(),
            menu_name: name.to_string(),
            quantity,
            total_price: total,
        }
    }

    #[test]
    fn parses_range_with_defaults() {
        let today = day(2024, 3, 31);

        let range = DateRange::parse(None, None, today).unwrap();
        assert_eq!(range, DateRange::last_days(today));

        let range = DateRange::parse(Some("2024-03-01"), Some("2024-03-10"), today).unwrap();
        assert_eq!(range.start, day(2024, 3, 1));
        assert_eq!(range.end, day(2024, 3, 10));
        assert_eq!(range.end_before(), Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());

        assert!(DateRange::parse(Some("2024-03-10"), Some("2024-03-01"), today).is_err());
        assert!(DateRange::parse(Some("10/03/2024"), None, today).is_err());
        assert!(DateRange::parse(None, Some("262142-12-31"), today).is_err());
    }

    #[test]
    fn aggregates_orders_and_items() {
        let range = DateRange {
            start: day(2024, 3, 1),
            end: day(2024, 3, 2),
        };
        let orders = vec![
            order("completed", 40_000.0, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()),
            order("completed", 25_000.0, Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap()),
            order("cancelled", 15_000.0, Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap()),
        ];
        let items = vec![
            sold("m-1", "Espresso", 1, 15_000.0),
            sold("m-2", "Cappuccino", 1, 25_000.0),
            sold("m-2", "Cappuccino", 1, 25_000.0),
            sold("m-1", "Espresso", 1, 15_000.0),
        ];

        let analytics = Analytics::compute(range, &orders, &items);

        assert_eq!(analytics.total_orders, 3);
        assert_eq!(analytics.total_revenue, 80_000.0);
        assert_eq!(
            analytics.orders_by_status,
            vec![
                StatusCountDto {
                    status: "cancelled".to_string(),
                    count: 1
                },
                StatusCountDto {
                    status: "completed".to_string(),
                    count: 2
                },
            ]
        );
        // Equal quantities fall back to name order.
        assert_eq!(analytics.popular_items[0].menu_name, "Cappuccino");
        assert_eq!(analytics.popular_items[0].revenue, 50_000.0);
        assert_eq!(analytics.daily_stats[0].date, "2024-03-02");
        assert_eq!(analytics.daily_stats[0].orders, 2);
        assert_eq!(analytics.daily_stats[1].revenue, 40_000.0);
    }
}
