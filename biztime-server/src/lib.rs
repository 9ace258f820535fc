//! biztime-server: HTTP server for companies, invoices and industries
//!
//! Thin CRUD layer over PostgreSQL. Handlers receive the connection pool
//! through axum state; repositories own the SQL.

pub mod db;
pub mod http;
pub mod models;

pub use db::create_pool;
pub use http::{build_router, run_server, ApiError, ServerConfig};
