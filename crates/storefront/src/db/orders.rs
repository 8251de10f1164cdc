//! Order repository (storefront side).
//!
//! Orders are created at checkout with snapshot items and a snapshot shipping
//! address, then marked paid after gateway verification. Customers can only
//! see and act on their own orders here; fulfillment changes live in the
//! admin binary.

use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;

use velvet_loom_core::{
    CancellationStatus, OrderId, OrderStatus, OrderTotals, PaymentStatus, UserId,
};

use crate::models::{CartLine, Order, OrderItem, OrderWithItems, ShippingAddress};

use super::RepositoryError;

const ORDER_SELECT: &str = r"
    SELECT id, user_id, order_number, status, payment_status, cancellation_status,
           subtotal, shipping, tax, total, gateway_order_id, gateway_payment_id,
           ship_recipient, ship_phone, ship_line1, ship_line2, ship_city,
           ship_state, ship_postal_code, ship_country,
           created_at, updated_at
    FROM shop.orders
";

/// Generate a human-facing order number, e.g. "VL-20260815-004217".
fn generate_order_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix: u32 = rand::rng().random_range(0..1_000_000);
    format!("VL-{date}-{suffix:06}")
}

/// Repository for order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a PENDING order from cart lines, snapshotting items and the
    /// shipping address in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back as a unit.
    pub async fn create(
        &self,
        user_id: UserId,
        lines: &[CartLine],
        totals: &OrderTotals,
        address: &ShippingAddress,
        gateway_order_id: &str,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r"
            INSERT INTO shop.orders (
                user_id, order_number, subtotal, shipping, tax, total,
                gateway_order_id,
                ship_recipient, ship_phone, ship_line1, ship_line2,
                ship_city, ship_state, ship_postal_code, ship_country
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {columns}
            ",
            columns = order_columns()
        ))
        .bind(user_id)
        .bind(generate_order_number())
        .bind(totals.subtotal)
        .bind(totals.shipping)
        .bind(totals.tax)
        .bind(totals.total)
        .bind(gateway_order_id)
        .bind(&address.ship_recipient)
        .bind(&address.ship_phone)
        .bind(&address.ship_line1)
        .bind(&address.ship_line2)
        .bind(&address.ship_city)
        .bind(&address.ship_state)
        .bind(&address.ship_postal_code)
        .bind(&address.ship_country)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO shop.order_items (
                    order_id, product_id, title, variant_label,
                    unit_price, quantity, image_url
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.title)
            .bind(&line.variant_label)
            .bind(line.unit_price)
            .bind(line.quantity)
            .bind(&line.image_url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// All orders for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("{ORDER_SELECT} WHERE user_id = $1 ORDER BY created_at DESC");
        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(orders)
    }

    /// Get one of the user's orders with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let sql = format!("{ORDER_SELECT} WHERE id = $1 AND user_id = $2");
        let Some(order) = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items = self.items(order_id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    /// Items of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT id, order_id, product_id, title, variant_label,
                   unit_price, quantity, image_url
            FROM shop.order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Look up one of the user's orders by its gateway order id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_gateway_order_id(
        &self,
        user_id: UserId,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("{ORDER_SELECT} WHERE gateway_order_id = $1 AND user_id = $2");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(gateway_order_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(order)
    }

    /// Record a verified payment: PAID + PROCESSING.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn mark_paid(
        &self,
        order_id: OrderId,
        gateway_payment_id: &str,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            r"
            UPDATE shop.orders
            SET payment_status = $2, status = $3,
                gateway_payment_id = $4, updated_at = now()
            WHERE id = $1
            RETURNING {columns}
            ",
            columns = order_columns()
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(PaymentStatus::Paid)
            .bind(OrderStatus::Processing)
            .bind(gateway_payment_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(order)
    }

    /// Record a customer cancellation request.
    ///
    /// Only PENDING/PROCESSING orders with no open or decided request can be
    /// flagged; the admin decides the outcome.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no eligible order matched.
    pub async fn request_cancellation(
        &self,
        user_id: UserId,
        order_id: OrderId,
        reason: Option<&str>,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            r"
            UPDATE shop.orders
            SET cancellation_status = $3, cancellation_reason = $4, updated_at = now()
            WHERE id = $1 AND user_id = $2
              AND status IN ($5, $6)
              AND cancellation_status = $7
            RETURNING {columns}
            ",
            columns = order_columns()
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(user_id)
            .bind(CancellationStatus::Requested)
            .bind(reason)
            .bind(OrderStatus::Pending)
            .bind(OrderStatus::Processing)
            .bind(CancellationStatus::None)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(order)
    }
}

/// The order column list shared by RETURNING clauses.
fn order_columns() -> &'static str {
    "id, user_id, order_number, status, payment_status, cancellation_status,
     subtotal, shipping, tax, total, gateway_order_id, gateway_payment_id,
     ship_recipient, ship_phone, ship_line1, ship_line2, ship_city,
     ship_state, ship_postal_code, ship_country,
     created_at, updated_at"
}
