use serde::Serialize;

use super::order_query::ValidationError;

/// Validated page window, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

impl Pagination {
    /// Convert a zero-based page number and page size into offset/limit.
    pub fn from_page(page: i64, size: i64) -> Result<Self, ValidationError> {
        if page < 0 {
            return Err(ValidationError::new("page", "Page must be non-negative"));
        }
        if size <= 0 {
            return Err(ValidationError::new("size", "Size must be positive"));
        }

        let offset = page
            .checked_mul(size)
            .ok_or_else(|| ValidationError::new("page", "Page offset out of range"))?;

        Ok(Self {
            offset,
            limit: size,
        })
    }
}
