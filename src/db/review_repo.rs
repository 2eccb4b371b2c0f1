use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::{Review, ReviewWithMember, ReviewWithProduct};

/// Reviews of a product, newest first, with each author's email.
pub async fn get_product_reviews(
    pool: &PgPool,
    product_id: i64,
) -> anyhow::Result<Vec<ReviewWithMember>> {
    let reviews = sqlx::query_as::<_, ReviewWithMember>(
        r#"
        SELECT r.id, r.content, r.score, m.email, r.product_id,
               r.created_at, r.last_modified_by_user_at, r.order_product_id
        FROM reviews r
        JOIN members m ON m.id = r.member_id
        WHERE r.product_id = $1
        ORDER BY r.created_at DESC, r.id DESC
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Reviews written by a member, newest first, with the reviewed product.
pub async fn get_member_reviews(
    pool: &PgPool,
    member_id: i64,
) -> anyhow::Result<Vec<ReviewWithProduct>> {
    let reviews = sqlx::query_as::<_, ReviewWithProduct>(
        r#"
        SELECT r.id, r.content, r.score, r.product_id,
               p.title AS product_title,
               p.author AS product_author,
               p.publisher AS product_publisher,
               p.cover_image AS product_cover_image,
               r.created_at, r.last_modified_by_user_at
        FROM reviews r
        JOIN products p ON p.id = r.product_id
        WHERE r.member_id = $1
        ORDER BY r.created_at DESC, r.id DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Add a review by `member_id` to `product_id`; returns the new review id.
/// Fails with `NotFound` when the product does not exist.
pub async fn add_review(
    pool: &PgPool,
    member_id: i64,
    product_id: i64,
    content: &str,
    score: Decimal,
    now: NaiveDateTime,
) -> Result<i64, AppError> {
    Review::validate_score(score)?;

    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        INSERT INTO reviews (product_id, member_id, content, score, created_at, last_modified_by_user_at)
        SELECT p.id, $2, $3, $4, $5, $5
        FROM products p
        WHERE p.id = $1
        RETURNING id
        "#,
    )
    .bind(product_id)
    .bind(member_id)
    .bind(content)
    .bind(score)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    let (review_id,) =
        row.ok_or_else(|| AppError::NotFound(format!("product {product_id} not found")))?;

    tracing::info!(review_id, product_id, member_id, "Review added");
    Ok(review_id)
}

/// Rewrite a member's own review. Reviews by other members are `NotFound`.
pub async fn update_review(
    pool: &PgPool,
    review_id: i64,
    member_id: i64,
    content: &str,
    score: Decimal,
    now: NaiveDateTime,
) -> Result<Review, AppError> {
    Review::validate_score(score)?;

    let review = sqlx::query_as::<_, Review>(
        r#"
        UPDATE reviews
        SET content = $3, score = $4, last_modified_by_user_at = $5
        WHERE id = $1 AND member_id = $2
        RETURNING *
        "#,
    )
    .bind(review_id)
    .bind(member_id)
    .bind(content)
    .bind(score)
    .bind(now)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("review {review_id} not found")))?;

    Ok(review)
}

/// Delete a member's own review. Reviews by other members are `NotFound`.
pub async fn delete_review(pool: &PgPool, review_id: i64, member_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND member_id = $2")
        .bind(review_id)
        .bind(member_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("review {review_id} not found")));
    }

    tracing::info!(review_id, member_id, "Review deleted");
    Ok(())
}
