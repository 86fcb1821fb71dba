use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::payment::Payment;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";

/// A payment row to insert.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: String,
    pub amount: f64,
    pub method: String,
    pub transaction_id: String,
    pub crypto_address: Option<String>,
}

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a new pending payment.
    pub async fn create(&self, payment: NewPayment) -> Result<Payment, DbErr> {
        let now = Utc::now();
        let payment = entity::payment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            order_id: ActiveValue::Set(payment.order_id),
            amount: ActiveValue::Set(payment.amount),
            method: ActiveValue::Set(payment.method),
            status: ActiveValue::Set(STATUS_PENDING.to_string()),
            transaction_id: ActiveValue::Set(payment.transaction_id),
            crypto_address: ActiveValue::Set(payment.crypto_address),
            confirmed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Payment::from_entity(payment))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    /// The most recent payment attempt for an order.
    pub async fn find_latest_for_order(&self, order_id: &str) -> Result<Option<Payment>, DbErr> {
        let payment = entity::prelude::Payment::find()
            .filter(entity::payment::Column::OrderId.eq(order_id))
            .order_by_desc(entity::payment::Column::CreatedAt)
            .one(self.db)
            .await?;

        Ok(payment.map(Payment::from_entity))
    }

    /// Marks a payment paid at `now`.
    pub async fn mark_paid(
        &self,
        payment: entity::payment::Model,
        now: DateTime<Utc>,
    ) -> Result<Payment, DbErr> {
        let mut active: entity::payment::ActiveModel = payment.into();
        active.status = ActiveValue::Set(STATUS_PAID.to_string());
        active.confirmed_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);

        Ok(Payment::from_entity(active.update(self.db).await?))
    }
}
