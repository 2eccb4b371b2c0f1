use crate::db::order_repo::OrderRepository;
use crate::errors::AppError;
use crate::metrics;
use crate::models::OrderSummary;
use crate::query::{resolve, Clock, OrderQueryRequest, SystemClock};

/// Order history listing: resolves a request, runs it against the
/// repository and renders the rows as summaries.
pub struct OrderHistoryService<R, C = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: OrderRepository> OrderHistoryService<R> {
    pub fn with_system_clock(repo: R) -> Self {
        Self::new(repo, SystemClock)
    }
}

impl<R: OrderRepository, C: Clock> OrderHistoryService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub async fn list_orders(
        &self,
        request: &OrderQueryRequest,
    ) -> Result<Vec<OrderSummary>, AppError> {
        let query = resolve(request, &self.clock).inspect_err(|e| {
            tracing::warn!(field = e.field, error = %e, "Order history query rejected");
            metrics::record_rejected(e);
        })?;
        metrics::record_resolved(request.date_range);

        tracing::debug!(
            date_range = request.date_range.as_str(),
            from = %query.from,
            to = %query.to,
            status = ?query.status,
            ordering = ?query.ordering,
            offset = query.offset,
            limit = query.limit,
            "Order history query resolved"
        );

        let records = self.repo.find_by_date_range_and_status(&query).await?;
        metrics::record_rows(records.len());

        Ok(records.into_iter().map(OrderSummary::from).collect())
    }
}
