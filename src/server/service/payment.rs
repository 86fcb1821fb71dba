//! Mock payment processing for crypto, cash and bank transfer.

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::payment::ProcessPaymentDto,
    server::{
        data::{
            order::OrderRepository,
            payment::{NewPayment, PaymentRepository, STATUS_PAID},
        },
        error::AppError,
        model::{
            order::PaymentMethod,
            payment::{Payment, PaymentInstructions, PaymentStatus},
        },
        service::cafe::CafeService,
        util::reference,
    },
};

/// Largest accepted difference between the paid amount and the order total.
pub const AMOUNT_TOLERANCE: f64 = 0.005;

/// Hours before crypto and transfer instructions expire.
pub const PAYMENT_WINDOW_HOURS: i64 = 24;

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts a payment for one of the user's orders.
    ///
    /// # Returns
    /// - `Ok(PaymentInstructions)` - Pending payment plus what the payer must do next
    /// - `Err(AppError::BadRequest)` - Unknown method or amount differs from the order total
    /// - `Err(AppError::NotFound)` - Order missing or placed by someone else
    pub async fn process(
        &self,
        user_id: &str,
        dto: ProcessPaymentDto,
    ) -> Result<PaymentInstructions, AppError> {
        let method = PaymentMethod::parse(&dto.method).ok_or_else(|| {
            AppError::BadRequest("Payment method must be crypto, cash or transfer".to_string())
        })?;

        let txn = self.db.begin().await?;
        let order_repo = OrderRepository::new(&txn);

        let order = match order_repo.find_model(&dto.order_id).await? {
            Some(order) if order.user_id == user_id => order,
            _ => return Err(AppError::NotFound("Order not found".to_string())),
        };

        if (dto.amount - order.total_amount).abs() > AMOUNT_TOLERANCE {
            return Err(AppError::BadRequest(
                "Payment amount doesn't match order total".to_string(),
            ));
        }

        let now = Utc::now();
        let crypto_address = (method == PaymentMethod::Crypto).then(reference::crypto_address);

        let payment = PaymentRepository::new(&txn)
            .create(NewPayment {
                order_id: order.id.clone(),
                amount: dto.amount,
                method: method.as_str().to_string(),
                transaction_id: reference::transaction_id(now),
                crypto_address: crypto_address.clone(),
            })
            .await?;

        order_repo
            .attach_payment(order, method.as_str(), &payment.id)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Payment {} started for order {} via {}",
            payment.transaction_id,
            payment.order_id,
            payment.method
        );

        let expires_at = now + Duration::hours(PAYMENT_WINDOW_HOURS);
        Ok(match (method, crypto_address) {
            (PaymentMethod::Crypto, Some(wallet_address)) => PaymentInstructions::Crypto {
                payment,
                wallet_address,
                expires_at,
            },
            (PaymentMethod::Transfer, _) => PaymentInstructions::Transfer {
                payment,
                virtual_account: reference::virtual_account(),
                expires_at,
            },
            _ => PaymentInstructions::Cash { payment },
        })
    }

    /// Payment state of one of the user's orders.
    ///
    /// # Returns
    /// - `Ok(PaymentStatus)` - Latest payment attempt and order payment status
    /// - `Err(AppError::NotFound)` - Order not the user's, or no payment started
    pub async fn status(&self, user_id: &str, order_id: &str) -> Result<PaymentStatus, AppError> {
        let order = match OrderRepository::new(self.db).find_model(order_id).await? {
            Some(order) if order.user_id == user_id => order,
            _ => return Err(AppError::NotFound("Order not found".to_string())),
        };

        let payment = PaymentRepository::new(self.db)
            .find_latest_for_order(&order.id)
            .await?
            .ok_or_else(|| AppError::NotFound("No payment found for this order".to_string()))?;

        Ok(PaymentStatus {
            order_id: order.id,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            payment,
        })
    }

    /// Marks a payment paid on behalf of the cafe that received the order.
    ///
    /// # Returns
    /// - `Ok(Payment)` - Payment marked paid; the order's payment status follows
    /// - `Err(AppError::NotFound)` - Payment missing or its order is not in the owner's cafe
    pub async fn confirm(&self, owner_id: &str, payment_id: &str) -> Result<Payment, AppError> {
        let cafe = CafeService::new(self.db).owned(owner_id).await?;
        let not_found = || AppError::NotFound("Payment not found".to_string());

        let txn = self.db.begin().await?;
        let payment_repo = PaymentRepository::new(&txn);
        let order_repo = OrderRepository::new(&txn);

        let payment = payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(not_found)?;
        let order = match order_repo.find_model(&payment.order_id).await? {
            Some(order) if order.cafe_id == cafe.id => order,
            _ => return Err(not_found()),
        };

        let payment = payment_repo.mark_paid(payment, Utc::now()).await?;
        order_repo.set_payment_status(order, STATUS_PAID).await?;

        txn.commit().await?;

        tracing::info!(
            "Payment {} confirmed for order {}",
            payment.transaction_id,
            payment.order_id
        );

        Ok(payment)
    }
}
