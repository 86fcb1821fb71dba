use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::{
    loyalty::{LoyaltyTransaction, RecordTransactionParams},
    page::{PageRequest, Paginated},
};

pub const TYPE_EARNED: &str = "earned";
pub const TYPE_REDEEMED: &str = "redeemed";

pub struct LoyaltyTransactionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LoyaltyTransactionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a ledger entry.
    pub async fn create(
        &self,
        params: RecordTransactionParams,
        now: DateTime<Utc>,
    ) -> Result<LoyaltyTransaction, DbErr> {
        let transaction = entity::loyalty_transaction::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            program_id: ActiveValue::Set(params.program_id),
            member_id: ActiveValue::Set(params.member_id),
            cafe_id: ActiveValue::Set(params.cafe_id),
            order_id: ActiveValue::Set(params.order_id),
            transaction_type: ActiveValue::Set(params.transaction_type),
            points: ActiveValue::Set(params.points),
            balance_after: ActiveValue::Set(params.balance_after),
            description: ActiveValue::Set(params.description),
            reference_id: ActiveValue::Set(params.reference_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(LoyaltyTransaction::from_entity(transaction))
    }

    /// A member's ledger, newest first.
    pub async fn list_for_member(
        &self,
        member_id: &str,
        page: PageRequest,
    ) -> Result<Paginated<LoyaltyTransaction>, DbErr> {
        let paginator = entity::prelude::LoyaltyTransaction::find()
            .filter(entity::loyalty_transaction::Column::MemberId.eq(member_id))
            .order_by_desc(entity::loyalty_transaction::Column::CreatedAt)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let transactions = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(LoyaltyTransaction::from_entity)
            .collect();

        Ok(Paginated::new(transactions, total, page))
    }
}
