use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for products table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover_image: Option<String>,
    pub price: Decimal,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Product with its category resolved. `category` is `None` when the row has
/// no category id or the referenced category no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover_image: Option<String>,
    pub price: Decimal,
    pub category: Option<Category>,
}

impl ProductRow {
    pub fn into_product(self, category: Option<Category>) -> Product {
        Product {
            id: self.id,
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            cover_image: self.cover_image,
            price: self.price,
            category,
        }
    }
}
