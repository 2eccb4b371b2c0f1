pub mod clock;
pub mod order_query;
pub mod pagination;

pub use clock::{Clock, FixedClock, SystemClock};
pub use order_query::{
    resolve, DateRange, OrderQueryRequest, OrderingKey, ResolvedOrderQuery, SortDirection,
    SortField, SortKey, SortOption, ValidationError,
};
pub use pagination::Pagination;
