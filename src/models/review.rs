use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::query::ValidationError;

/// Database row for reviews table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    pub member_id: i64,
    pub order_product_id: Option<i64>,
    pub content: String,
    pub score: Decimal,
    pub created_at: NaiveDateTime,
    pub last_modified_by_user_at: NaiveDateTime,
}

impl Review {
    /// Scores run from 0 to 5 inclusive.
    pub fn validate_score(score: Decimal) -> Result<(), ValidationError> {
        if score < Decimal::ZERO || score > Decimal::from(5) {
            return Err(ValidationError::new(
                "score",
                "Score must be between 0 and 5",
            ));
        }
        Ok(())
    }
}

/// A product's review together with its author's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithMember {
    #[serde(rename = "reviewId")]
    pub id: i64,
    pub content: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
    pub email: String,
    pub product_id: i64,
    pub created_at: NaiveDateTime,
    pub last_modified_by_user_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub order_product_id: Option<i64>,
}

/// A member's review together with the reviewed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithProduct {
    #[serde(rename = "reviewId")]
    pub id: i64,
    pub content: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
    pub product_id: i64,
    pub product_title: String,
    pub product_author: String,
    pub product_publisher: String,
    pub product_cover_image: Option<String>,
    pub created_at: NaiveDateTime,
    pub last_modified_by_user_at: NaiveDateTime,
}
