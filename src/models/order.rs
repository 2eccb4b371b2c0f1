use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::OrderStatus;

const ORDER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One row of the order history query: an order joined with its member and
/// aggregated over its order_product lines.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRecord {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub ordered_at: NaiveDateTime,
    pub recipient: String,
    pub member_name: String,
    pub price: Decimal,
    pub discounted_price: Decimal,
    pub product_count: i64,
    pub first_product_title: Option<String>,
}

impl OrderRecord {
    /// Short description of the order lines, e.g. "Rust in Action and 2 more".
    pub fn content(&self) -> String {
        match (&self.first_product_title, self.product_count) {
            (Some(title), 1) => title.clone(),
            (Some(title), n) if n > 1 => format!("{title} and {} more", n - 1),
            _ => String::new(),
        }
    }

    pub fn order_status(&self) -> Option<OrderStatus> {
        OrderStatus::from_db_str(&self.status)
    }
}

/// Order history list item returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub order_number: String,
    pub content: String,
    pub order_date: String,
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discounted_price: Decimal,
    pub member_name: String,
    pub recipient: String,
}

impl From<OrderRecord> for OrderSummary {
    fn from(record: OrderRecord) -> Self {
        let content = record.content();
        // Unknown statuses are passed through as stored.
        let status = record
            .order_status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| record.status.clone());

        Self {
            id: record.id.to_string(),
            order_number: record.order_number,
            content,
            order_date: record.ordered_at.format(ORDER_DATE_FORMAT).to_string(),
            status,
            price: record.price,
            discounted_price: record.discounted_price,
            member_name: record.member_name,
            recipient: record.recipient,
        }
    }
}
