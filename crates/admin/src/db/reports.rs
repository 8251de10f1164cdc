//! Reporting queries. Revenue always means PAID orders; cancelled-but-paid
//! orders still count until a refund flow exists.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{DashboardKpis, MonthlyRevenue, TopProduct};

/// Repository for dashboard and report aggregates.
pub struct ReportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Headline numbers for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn dashboard_kpis(&self) -> Result<DashboardKpis, RepositoryError> {
        let kpis = sqlx::query_as::<_, DashboardKpis>(
            r"
            SELECT
                (SELECT COALESCE(SUM(total), 0) FROM shop.orders
                 WHERE payment_status = 'PAID') AS total_revenue,
                (SELECT COUNT(*) FROM shop.orders) AS order_count,
                (SELECT COUNT(*) FROM shop.users) AS customer_count,
                (SELECT COUNT(*) FROM shop.products
                 WHERE archived_at IS NULL) AS product_count,
                (SELECT COUNT(*) FROM shop.orders
                 WHERE cancellation_status = 'REQUESTED') AS pending_cancellations
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(kpis)
    }

    /// Revenue bucketed by calendar month for the trailing `months` window,
    /// oldest first. Months with no orders appear with zero values, which is
    /// why the bucketing happens here instead of a `GROUP BY` that would
    /// skip them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_revenue(
        &self,
        months: u32,
    ) -> Result<Vec<MonthlyRevenue>, RepositoryError> {
        let months = months.max(1);
        let now = Utc::now();
        let current = month_start(now);
        let window_start = current
            .checked_sub_months(Months::new(months - 1))
            .unwrap_or(current);

        let rows: Vec<(DateTime<Utc>, Decimal)> = sqlx::query_as(
            r"
            SELECT created_at, total
            FROM shop.orders
            WHERE payment_status = 'PAID' AND created_at >= $1
            ",
        )
        .bind(window_start.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()))
        .fetch_all(self.pool)
        .await?;

        let mut buckets: Vec<MonthlyRevenue> = (0..months)
            .filter_map(|i| window_start.checked_add_months(Months::new(i)))
            .map(|month| MonthlyRevenue {
                month,
                order_count: 0,
                revenue: Decimal::ZERO,
            })
            .collect();

        for (created_at, total) in rows {
            let month = month_start(created_at);
            if let Some(bucket) = buckets.iter_mut().find(|b| b.month == month) {
                bucket.order_count += 1;
                bucket.revenue += total;
            }
        }

        Ok(buckets)
    }

    /// Best-selling products by units over PAID orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_products(&self, limit: i64) -> Result<Vec<TopProduct>, RepositoryError> {
        let products = sqlx::query_as::<_, TopProduct>(
            r"
            SELECT oi.product_id,
                   MAX(oi.title) AS title,
                   SUM(oi.quantity)::bigint AS units_sold,
                   SUM(oi.unit_price * oi.quantity) AS revenue
            FROM shop.order_items oi
            JOIN shop.orders o ON o.id = oi.order_id
            WHERE o.payment_status = 'PAID'
            GROUP BY oi.product_id
            ORDER BY units_sold DESC, revenue DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}

fn month_start(at: DateTime<Utc>) -> NaiveDate {
    NaiveDate::from_ymd_opt(at.year(), at.month(), 1).unwrap_or_else(|| at.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_start_truncates_to_first_of_month() {
        let at = Utc.with_ymd_and_hms(2026, 8, 27, 14, 30, 0).unwrap();
        assert_eq!(
            month_start(at),
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
        );
    }
}
