pub mod member;
pub mod order;
pub mod order_product;
pub mod product;
pub mod review;

pub use member::Member;
pub use order::{OrderRecord, OrderSummary};
pub use order_product::OrderProduct;
pub use product::{Category, Product};
pub use review::{Review, ReviewWithMember, ReviewWithProduct};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Preparing,
    Shipping,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Every status in lifecycle order; "status asc" sorts by position here.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Preparing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    /// Value stored in the `orders.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            "preparing" => Some(OrderStatus::Preparing),
            "shipping" => Some(OrderStatus::Shipping),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            "returned" => Some(OrderStatus::Returned),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper = self.as_str().to_uppercase();
        f.write_str(&upper)
    }
}
