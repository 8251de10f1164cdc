//! Cart and wishlist models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use velvet_loom_core::{CartItemId, OrderTotals, ProductId, VariantId, WishlistItemId};

/// A cart line joined with its product/variant display data.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub slug: String,
    pub title: String,
    pub variant_label: Option<String>,
    /// Effective unit price (variant override or product base price).
    pub unit_price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
}

impl CartLine {
    /// Line total: unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The cart response body: lines plus a totals preview.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub item_count: i64,
    pub totals: OrderTotals,
}

impl CartView {
    /// Build a view from cart lines, computing the totals preview.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let item_count = items.iter().map(|l| i64::from(l.quantity)).sum();
        let totals = OrderTotals::from_lines(items.iter().map(|l| (l.unit_price, l.quantity)));
        Self {
            items,
            item_count,
            totals,
        }
    }

    /// An empty cart with zero totals.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_lines(Vec::new())
    }
}

/// A wishlist entry joined with product display data.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub product_id: ProductId,
    pub slug: String,
    pub title: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: Decimal, quantity: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(1),
            product_id: ProductId::new(1),
            variant_id: None,
            slug: "linen-shirt".to_string(),
            title: "Linen Shirt".to_string(),
            variant_label: None,
            unit_price,
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_view_counts_quantities_not_lines() {
        let view = CartView::from_lines(vec![
            line(Decimal::new(29_900, 2), 2),
            line(Decimal::new(9_900, 2), 3),
        ]);
        assert_eq!(view.item_count, 5);
        assert_eq!(view.totals.subtotal, Decimal::new(89_500, 2));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(
            line(Decimal::new(49_950, 2), 2).line_total(),
            Decimal::new(99_900, 2)
        );
    }
}
