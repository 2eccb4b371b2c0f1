use std::future::Future;

use sqlx::PgPool;

use crate::models::{OrderProduct, OrderRecord, OrderStatus};
use crate::query::{OrderingKey, ResolvedOrderQuery, SortField};

/// Order history reads, as consumed by the order history service.
pub trait OrderRepository {
    fn find_by_date_range_and_status(
        &self,
        query: &ResolvedOrderQuery,
    ) -> impl Future<Output = anyhow::Result<Vec<OrderRecord>>> + Send;
}

/// Postgres-backed [`OrderRepository`].
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for PgOrderRepository {
    async fn find_by_date_range_and_status(
        &self,
        query: &ResolvedOrderQuery,
    ) -> anyhow::Result<Vec<OrderRecord>> {
        find_orders(&self.pool, query).await
    }
}

const ORDER_HISTORY_SELECT: &str = r#"
    SELECT o.id, o.order_number, o.status, o.ordered_at, o.recipient,
           m.name AS member_name,
           COALESCE(SUM(op.price * op.quantity), 0) AS price,
           COALESCE(SUM(op.discounted_price * op.quantity), 0) AS discounted_price,
           COUNT(op.id) AS product_count,
           (ARRAY_AGG(p.title ORDER BY op.id))[1] AS first_product_title
    FROM orders o
    JOIN members m ON m.id = o.member_id
    LEFT JOIN order_product op ON op.order_id = o.id
    LEFT JOIN products p ON p.id = op.product_id
    WHERE o.ordered_at >= $1 AND o.ordered_at < $2
      AND ($3::TEXT IS NULL OR o.status = $3)
    GROUP BY o.id, m.name
"#;

/// Sort expression for `field`. Status sorts by its position in
/// [`OrderStatus::ALL`]; unknown stored values rank last.
fn sort_expr(field: SortField) -> String {
    match field {
        SortField::OrderDate => format!("o.{}", field.column()),
        SortField::Status => {
            let arms: Vec<String> = OrderStatus::ALL
                .iter()
                .enumerate()
                .map(|(rank, status)| format!("WHEN '{}' THEN {rank}", status.as_str()))
                .collect();
            format!("CASE LOWER(o.{}) {} END", field.column(), arms.join(" "))
        }
    }
}

/// `ORDER BY` for the history query; empty when no ordering is requested.
/// Ordered queries end on `o.id DESC` so equal keys page deterministically.
fn order_by_clause(ordering: OrderingKey) -> String {
    let keys = ordering.keys();
    if keys.is_empty() {
        return String::new();
    }

    let mut columns: Vec<String> = keys
        .iter()
        .map(|k| format!("{} {}", sort_expr(k.field), k.direction.as_sql()))
        .collect();
    columns.push("o.id DESC".to_string());

    format!("ORDER BY {}", columns.join(", "))
}

/// Orders placed in `[query.from, query.to)`, optionally filtered by status,
/// ordered and paged as resolved.
pub async fn find_orders(
    pool: &PgPool,
    query: &ResolvedOrderQuery,
) -> anyhow::Result<Vec<OrderRecord>> {
    let sql = format!(
        "{ORDER_HISTORY_SELECT} {} LIMIT $4 OFFSET $5",
        order_by_clause(query.ordering)
    );

    let orders = sqlx::query_as::<_, OrderRecord>(&sql)
        .bind(query.from)
        .bind(query.to)
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(pool)
        .await?;

    Ok(orders)
}

/// Product lines of a single order.
pub async fn get_order_products(pool: &PgPool, order_id: i64) -> anyhow::Result<Vec<OrderProduct>> {
    let lines = sqlx::query_as::<_, OrderProduct>(
        "SELECT * FROM order_product WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(lines)
}
