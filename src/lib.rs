pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod query;
pub mod services;

pub use errors::AppError;
pub use query::{resolve, OrderQueryRequest, ResolvedOrderQuery, ValidationError};
