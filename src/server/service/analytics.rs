//! Sales dashboards for cafe owners and the platform.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::order::OrderRepository,
    error::AppError,
    model::analytics::{Analytics, DateRange},
    service::cafe::CafeService,
};

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sales of the owner's cafe over an inclusive date window.
    pub async fn for_owner(
        &self,
        owner_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Analytics, AppError> {
        let range = DateRange::parse(start_date, end_date, Utc::now().date_naive())
            .map_err(AppError::BadRequest)?;
        let cafe = CafeService::new(self.db).owned(owner_id).await?;

        self.compute(Some(&cafe.id), range).await
    }

    /// Sales across all cafes over the last 30 days.
    pub async fn platform(&self) -> Result<Analytics, AppError> {
        let range = DateRange::last_days(Utc::now().date_naive());

        self.compute(None, range).await
    }

    async fn compute(&self, cafe_id: Option<&str>, range: DateRange) -> Result<Analytics, AppError> {
        let repo = OrderRepository::new(self.db);

        let orders = repo
            .list_created_between(cafe_id, range.start_at(), range.end_before())
            .await?;
        let order_ids = orders.iter().map(|o| o.id.clone()).collect();
        let items = repo.sold_items(order_ids).await?;

        Ok(Analytics::compute(range, &orders, &items))
    }
}
