pub mod order_history;

pub use order_history::OrderHistoryService;
