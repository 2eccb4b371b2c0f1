use std::collections::HashMap;

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::product::ProductRow;
use crate::models::{Category, Product};
use crate::query::Pagination;

/// Get a product by id. Missing products are a `NotFound` error.
pub async fn get_product_by_id(pool: &PgPool, product_id: i64) -> Result<Product, AppError> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id} not found")))?;

    let mut products = with_categories(pool, vec![row]).await?;
    products
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("product {product_id} not found")))
}

/// Get every product whose id is in `ids`. Unknown ids are skipped.
pub async fn get_products_by_ids(pool: &PgPool, ids: &[i64]) -> anyhow::Result<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT * FROM products WHERE id = ANY($1) ORDER BY id",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    with_categories(pool, rows).await
}

/// One page of products in a category.
pub async fn get_products_by_category(
    pool: &PgPool,
    category_id: i64,
    page: i64,
    size: i64,
) -> Result<Vec<Product>, AppError> {
    let pagination = Pagination::from_page(page, size)?;

    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT * FROM products WHERE category_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
    )
    .bind(category_id)
    .bind(pagination.limit)
    .bind(pagination.offset)
    .fetch_all(pool)
    .await?;

    Ok(with_categories(pool, rows).await?)
}

/// Case-insensitive title/author search. Both filters are optional; with
/// neither set this pages through every product.
pub async fn search_products(
    pool: &PgPool,
    keyword: Option<&str>,
    category_id: Option<i64>,
    page: i64,
    size: i64,
) -> Result<Vec<Product>, AppError> {
    let pagination = Pagination::from_page(page, size)?;
    let pattern = keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| format!("%{}%", escape_like(k)));

    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT * FROM products
        WHERE ($1::TEXT IS NULL OR title ILIKE $1 OR author ILIKE $1)
          AND ($2::BIGINT IS NULL OR category_id = $2)
        ORDER BY id
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(pattern)
    .bind(category_id)
    .bind(pagination.limit)
    .bind(pagination.offset)
    .fetch_all(pool)
    .await?;

    Ok(with_categories(pool, rows).await?)
}

/// Resolve categories for a page of product rows with one lookup.
async fn with_categories(pool: &PgPool, rows: Vec<ProductRow>) -> anyhow::Result<Vec<Product>> {
    let mut category_ids: Vec<i64> = rows.iter().filter_map(|r| r.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let categories: HashMap<i64, Category> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        sqlx::query_as::<_, Category>("SELECT id, name, parent_id FROM categories WHERE id = ANY($1)")
            .bind(&category_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    };

    Ok(compose(rows, &categories))
}

fn compose(rows: Vec<ProductRow>, categories: &HashMap<i64, Category>) -> Vec<Product> {
    rows.into_iter()
        .map(|row| {
            let category = row.category_id.and_then(|id| categories.get(&id).cloned());
            row.into_product(category)
        })
        .collect()
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
