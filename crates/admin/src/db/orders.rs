//! Order repository (admin side).
//!
//! Status changes go through the state machine in
//! [`velvet_loom_core::OrderStatus`]; invalid transitions surface as
//! `Conflict` before any row is touched. Cancellation decisions resolve
//! customer requests: approval cancels the order, rejection leaves the
//! fulfillment status alone.

use sqlx::PgPool;

use velvet_loom_core::{CancellationStatus, OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{AdminOrder, AdminOrderDetail, AdminOrderItem};

const ORDER_SELECT: &str = r"
    SELECT o.id, o.user_id, o.order_number, o.status, o.payment_status,
           o.cancellation_status, o.cancellation_reason,
           o.subtotal, o.shipping, o.tax, o.total,
           o.gateway_order_id, o.gateway_payment_id,
           o.ship_recipient, o.ship_phone, o.ship_line1, o.ship_line2,
           o.ship_city, o.ship_state, o.ship_postal_code, o.ship_country,
           u.email AS customer_email, u.name AS customer_name,
           o.created_at, o.updated_at
    FROM shop.orders o
    JOIN shop.users u ON u.id = o.user_id
";

/// Filters for the order listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub cancellation_status: Option<CancellationStatus>,
    /// Matches the order number or customer email (substring).
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Repository for admin order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Orders matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<AdminOrder>, RepositoryError> {
        let sql = format!(
            r"
            {ORDER_SELECT}
            WHERE ($1::shop.order_status IS NULL OR o.status = $1)
              AND ($2::shop.cancellation_status IS NULL OR o.cancellation_status = $2)
              AND ($3::text IS NULL
                   OR o.order_number ILIKE '%' || $3 || '%'
                   OR u.email ILIKE '%' || $3 || '%')
            ORDER BY o.created_at DESC
            LIMIT $4 OFFSET $5
            "
        );
        let orders = sqlx::query_as::<_, AdminOrder>(&sql)
            .bind(filter.status)
            .bind(filter.cancellation_status)
            .bind(&filter.search)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool)
            .await?;

        Ok(orders)
    }

    /// A customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<AdminOrder>, RepositoryError> {
        let sql = format!(
            "{ORDER_SELECT} WHERE o.user_id = $1 ORDER BY o.created_at DESC LIMIT $2"
        );
        let orders = sqlx::query_as::<_, AdminOrder>(&sql)
            .bind(user_id)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(orders)
    }

    /// One order with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn get(&self, order_id: OrderId) -> Result<AdminOrderDetail, RepositoryError> {
        let sql = format!("{ORDER_SELECT} WHERE o.id = $1");
        let order = sqlx::query_as::<_, AdminOrder>(&sql)
            .bind(order_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let items = sqlx::query_as::<_, AdminOrderItem>(
            r"
            SELECT id, product_id, title, variant_label, unit_price, quantity, image_url
            FROM shop.order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(AdminOrderDetail { order, items })
    }

    /// Move an order to a new fulfillment status.
    ///
    /// The row is locked while the transition is validated so two
    /// concurrent updates cannot both pass the check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` for an invalid transition, or
    /// `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_status(
        &self,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<AdminOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (current,): (OrderStatus,) =
            sqlx::query_as("SELECT status FROM shop.orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(RepositoryError::NotFound)?;

        if !current.can_transition_to(new_status) {
            return Err(RepositoryError::Conflict(format!(
                "cannot move order from {current} to {new_status}"
            )));
        }

        sqlx::query("UPDATE shop.orders SET status = $2, updated_at = now() WHERE id = $1")
            .bind(order_id)
            .bind(new_status)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let detail = self.get(order_id).await?;
        Ok(detail.order)
    }

    /// Decide an open cancellation request.
    ///
    /// Approval moves the order to CANCELLED; rejection records the decision
    /// and leaves the fulfillment status untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order has no open request.
    pub async fn decide_cancellation(
        &self,
        order_id: OrderId,
        approve: bool,
    ) -> Result<AdminOrder, RepositoryError> {
        let decision = if approve {
            CancellationStatus::Approved
        } else {
            CancellationStatus::Rejected
        };

        let result = if approve {
            sqlx::query(
                r"
                UPDATE shop.orders
                SET cancellation_status = $2, status = $3, updated_at = now()
                WHERE id = $1 AND cancellation_status = $4
                ",
            )
            .bind(order_id)
            .bind(decision)
            .bind(OrderStatus::Cancelled)
            .bind(CancellationStatus::Requested)
            .execute(self.pool)
            .await?
        } else {
            sqlx::query(
                r"
                UPDATE shop.orders
                SET cancellation_status = $2, updated_at = now()
                WHERE id = $1 AND cancellation_status = $3
                ",
            )
            .bind(order_id)
            .bind(decision)
            .bind(CancellationStatus::Requested)
            .execute(self.pool)
            .await?
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(
                "order has no open cancellation request".to_string(),
            ));
        }

        let detail = self.get(order_id).await?;
        Ok(detail.order)
    }
}
