//! Order placement, lookup, status transitions and receipts.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        cafe::CafeRepository, menu::MenuRepository, order::OrderRepository,
        payment::PaymentRepository,
    },
    error::AppError,
    model::{
        cafe::CafeInfo,
        order::{CreateOrderParams, Order, OrderFilter, OrderStatus, PricedLine},
        page::{PageRequest, Paginated},
        user::{Role, User},
    },
    service::{
        cafe::CafeService,
        loyalty::award_points,
        receipt::{self, ReceiptFormat},
    },
    util::reference,
};

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Places an order priced from the current menu.
    ///
    /// Menu lookups and inserts share one transaction, so a missing menu or a cafe
    /// mismatch on any line leaves nothing behind.
    ///
    /// # Returns
    /// - `Ok(Order)` - Pending order with items and their menus
    /// - `Err(AppError::NotFound)` - A menu item is missing, deleted or unavailable
    /// - `Err(AppError::BadRequest)` - Items belong to more than one cafe
    pub async fn create(&self, params: CreateOrderParams) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;
        let menu_repo = MenuRepository::new(&txn);

        let mut lines = Vec::with_capacity(params.lines.len());
        for line in &params.lines {
            let Some(menu) = menu_repo.find_orderable(&line.menu_id).await? else {
                return Err(AppError::NotFound(format!(
                    "Menu item {} not found or unavailable",
                    line.menu_id
                )));
            };
            lines.push(PricedLine {
                menu,
                quantity: line.quantity,
                notes: line.notes.clone(),
            });
        }

        let cafe_id = match lines.first() {
            Some(line) => line.menu.cafe_id.clone(),
            None => {
                return Err(AppError::BadRequest(
                    "Order must contain at least one item".to_string(),
                ))
            }
        };
        if lines.iter().any(|line| line.menu.cafe_id != cafe_id) {
            return Err(AppError::BadRequest(
                "All items must be from the same cafe".to_string(),
            ));
        }

        let order_number = reference::order_number(Utc::now());
        let order = OrderRepository::new(&txn)
            .create(&params, &cafe_id, order_number, lines)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Order {} placed by user {} at cafe {} for {:.0}",
            order.order_number,
            order.user_id,
            order.cafe_id,
            order.total_amount
        );

        Ok(order)
    }

    /// The user's own orders, newest first.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        status: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<Order>, AppError> {
        let filter = OrderFilter {
            user_id: Some(user_id.to_string()),
            status,
            ..Default::default()
        };

        Ok(OrderRepository::new(self.db).list(filter, page).await?)
    }

    /// Every order on the platform, newest first.
    pub async fn list_all(
        &self,
        status: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<Order>, AppError> {
        let filter = OrderFilter {
            status,
            ..Default::default()
        };

        Ok(OrderRepository::new(self.db).list(filter, page).await?)
    }

    /// Gets an order the user may see.
    ///
    /// Customers see the orders they placed. Owners additionally see orders of their cafe.
    ///
    /// # Returns
    /// - `Ok(Order)` - Order with items
    /// - `Err(AppError::NotFound)` - Order missing or not visible to the user
    pub async fn get_for_user(&self, user: &User, order_id: &str) -> Result<Order, AppError> {
        let not_found = || AppError::NotFound("Order not found".to_string());

        let order = OrderRepository::new(self.db)
            .find_by_id(order_id)
            .await?
            .ok_or_else(not_found)?;

        if order.user_id == user.id {
            return Ok(order);
        }

        if user.role == Role::Owner {
            let owned = CafeRepository::new(self.db).find_by_owner(&user.id).await?;
            if owned.is_some_and(|cafe| cafe.id == order.cafe_id) {
                return Ok(order);
            }
        }

        Err(not_found())
    }

    /// Moves an order of the owner's cafe to a new status.
    ///
    /// Completing an order credits loyalty points to the customer in the same transaction.
    ///
    /// # Returns
    /// - `Ok(Order)` - Updated order with items
    /// - `Err(AppError::BadRequest)` - Unknown status
    /// - `Err(AppError::NotFound)` - Owner has no cafe, or the order is not in it
    pub async fn update_status(
        &self,
        owner_id: &str,
        order_id: &str,
        status: &str,
    ) -> Result<Order, AppError> {
        let status = OrderStatus::parse(status).ok_or_else(|| {
            AppError::BadRequest(
                "Status must be one of pending, confirmed, preparing, ready, completed, cancelled"
                    .to_string(),
            )
        })?;
        let cafe = CafeService::new(self.db).owned(owner_id).await?;

        let txn = self.db.begin().await?;
        let order_repo = OrderRepository::new(&txn);

        let order = match order_repo.find_model(order_id).await? {
            Some(order) if order.cafe_id == cafe.id => order,
            _ => return Err(AppError::NotFound("Order not found".to_string())),
        };

        let now = Utc::now();
        let order = order_repo.update_status(order, status, now).await?;

        if status == OrderStatus::Completed {
            award_points(
                &txn,
                &order.cafe_id,
                &order.user_id,
                &order.id,
                order.total_amount,
                now,
            )
            .await?;
        }

        txn.commit().await?;

        tracing::info!("Order {} moved to {}", order.order_number, status.as_str());

        OrderRepository::new(self.db)
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    /// Renders a receipt for an order visible to the user.
    ///
    /// The order's cafe supplies the header; `fallback` is used when that cafe is gone.
    pub async fn receipt(
        &self,
        user: &User,
        order_id: &str,
        format: ReceiptFormat,
        fallback: &CafeInfo,
    ) -> Result<String, AppError> {
        let order = self.get_for_user(user, order_id).await?;

        let cafe = CafeRepository::new(self.db)
            .find_by_id(&order.cafe_id)
            .await?
            .map(|cafe| CafeInfo::from_cafe(&cafe))
            .unwrap_or_else(|| fallback.clone());
        let payment = PaymentRepository::new(self.db)
            .find_latest_for_order(&order.id)
            .await?;

        Ok(receipt::render(format, &cafe, &order, payment.as_ref()))
    }
}
