//! Database layer - connection pool, schema and repositories
//!
//! - Pool is created once and injected; no global connection
//! - Rely on DB constraints, surface violations; no check-then-insert
//! - Transactions for multi-step writes

pub mod pool;
pub mod repos;
pub mod schema;
pub mod seed;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use sqlx::PgPool;
