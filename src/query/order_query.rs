use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::OrderStatus;

use super::clock::Clock;
use super::pagination::Pagination;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

// ---------------------------------------------------------------------------
// Request enums
// ---------------------------------------------------------------------------

/// Named order history window ending now, or an explicit interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "LAST_WEEK")]
    LastWeek,
    #[serde(rename = "LAST_MONTH")]
    LastMonth,
    #[serde(rename = "LAST_3_MONTHS")]
    Last3Months,
    #[serde(rename = "LAST_6_MONTHS")]
    Last6Months,
    #[serde(rename = "CUSTOM")]
    Custom,
}

/// How far back a relative range reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeOffset {
    Days(i64),
    Months(u32),
}

impl DateRange {
    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::LastWeek => "LAST_WEEK",
            DateRange::LastMonth => "LAST_MONTH",
            DateRange::Last3Months => "LAST_3_MONTHS",
            DateRange::Last6Months => "LAST_6_MONTHS",
            DateRange::Custom => "CUSTOM",
        }
    }

    /// `None` for CUSTOM.
    fn offset(self) -> Option<RangeOffset> {
        match self {
            DateRange::LastWeek => Some(RangeOffset::Days(7)),
            DateRange::LastMonth => Some(RangeOffset::Months(1)),
            DateRange::Last3Months => Some(RangeOffset::Months(3)),
            DateRange::Last6Months => Some(RangeOffset::Months(6)),
            DateRange::Custom => None,
        }
    }
}

impl RangeOffset {
    /// Month arithmetic clamps to the last day of the target month
    /// (2024-03-31 minus one month is 2024-02-29).
    fn subtract_from(self, to: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            RangeOffset::Days(days) => to.checked_sub_signed(Duration::days(days)),
            RangeOffset::Months(months) => to.checked_sub_months(Months::new(months)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOption {
    #[default]
    Recent,
    OrderStatus,
    All,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortField {
    OrderDate,
    Status,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::OrderDate => "ordered_at",
            SortField::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

const ORDER_DATE_DESC: SortKey = SortKey {
    field: SortField::OrderDate,
    direction: SortDirection::Desc,
};

const STATUS_ASC: SortKey = SortKey {
    field: SortField::Status,
    direction: SortDirection::Asc,
};

/// Row ordering selected by a request's `sortBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderingKey {
    /// Newest orders first.
    Recent,
    /// Grouped by status, newest first within a status.
    StatusThenRecent,
    /// No ordering; the repository's natural order applies.
    Unordered,
}

impl OrderingKey {
    pub fn keys(self) -> &'static [SortKey] {
        match self {
            OrderingKey::Recent => &[ORDER_DATE_DESC],
            OrderingKey::StatusThenRecent => &[STATUS_ASC, ORDER_DATE_DESC],
            OrderingKey::Unordered => &[],
        }
    }
}

impl From<SortOption> for OrderingKey {
    fn from(option: SortOption) -> Self {
        match option {
            SortOption::Recent => OrderingKey::Recent,
            SortOption::OrderStatus => OrderingKey::StatusThenRecent,
            SortOption::All => OrderingKey::Unordered,
        }
    }
}

// ---------------------------------------------------------------------------
// Request / resolved query
// ---------------------------------------------------------------------------

/// Rejected request: the first rule violated, by request field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Order history query as received from a caller.
///
/// `start_date` / `end_date` are only read when `date_range` is CUSTOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryRequest {
    pub date_range: DateRange,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub sort_by: SortOption,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
}

impl OrderQueryRequest {
    /// Request for `date_range` with every other field at its default.
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            status: None,
            sort_by: SortOption::default(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            start_date: None,
            end_date: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date_range == DateRange::Custom {
            self.custom_bounds()?;
        }
        Pagination::from_page(self.page, self.size)?;
        Ok(())
    }

    /// Explicit `[start, end)` of a CUSTOM request.
    fn custom_bounds(&self) -> Result<(NaiveDateTime, NaiveDateTime), ValidationError> {
        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            (None, _) => {
                return Err(ValidationError::new(
                    "startDate",
                    "Custom date range requires start and end dates",
                ))
            }
            (_, None) => {
                return Err(ValidationError::new(
                    "endDate",
                    "Custom date range requires start and end dates",
                ))
            }
        };

        if start >= end {
            return Err(ValidationError::new(
                "startDate",
                "Start date must be before end date",
            ));
        }

        Ok((start, end))
    }
}

/// Executable order history query: `from <= ordered_at < to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOrderQuery {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub status: Option<OrderStatus>,
    pub ordering: OrderingKey,
    pub offset: i64,
    pub limit: i64,
}

/// Validate `request` and resolve it against `clock`.
///
/// Fails on the first violated rule, checked in this order: CUSTOM bounds
/// present, CUSTOM bounds ordered, page non-negative, size positive.
/// Reads the clock at most once.
pub fn resolve(
    request: &OrderQueryRequest,
    clock: &impl Clock,
) -> Result<ResolvedOrderQuery, ValidationError> {
    let (from, to) = match request.date_range.offset() {
        Some(offset) => relative_window(request, offset, clock)?,
        None => request.custom_bounds()?,
    };

    let pagination = Pagination::from_page(request.page, request.size)?;

    Ok(ResolvedOrderQuery {
        from,
        to,
        status: request.status,
        ordering: request.sort_by.into(),
        offset: pagination.offset,
        limit: pagination.limit,
    })
}

fn relative_window(
    request: &OrderQueryRequest,
    offset: RangeOffset,
    clock: &impl Clock,
) -> Result<(NaiveDateTime, NaiveDateTime), ValidationError> {
    if request.start_date.is_some() || request.end_date.is_some() {
        tracing::debug!(
            date_range = request.date_range.as_str(),
            "Explicit start/end dates ignored for relative date range"
        );
    }

    let to = clock.now();
    let from = offset
        .subtract_from(to)
        .ok_or_else(|| ValidationError::new("dateRange", "Date range start out of range"))?;

    Ok((from, to))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
