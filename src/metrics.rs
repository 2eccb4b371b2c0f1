use metrics::counter;

use crate::query::{DateRange, ValidationError};

pub fn record_resolved(date_range: DateRange) {
    counter!("order_queries_resolved_total", "date_range" => date_range.as_str()).increment(1);
}

pub fn record_rejected(error: &ValidationError) {
    counter!("order_queries_rejected_total", "field" => error.field).increment(1);
}

pub fn record_rows(count: usize) {
    counter!("order_history_rows_total").increment(count as u64);
}
