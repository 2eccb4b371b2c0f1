use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for order_product table: one product line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderProduct {
    pub id: i64,
    pub order_id: Option<i64>,
    pub product_id: i64,
    pub quantity: i64,
    pub price: Decimal,
    pub discounted_price: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl OrderProduct {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn discounted_line_total(&self) -> Decimal {
        self.discounted_price * Decimal::from(self.quantity)
    }
}
