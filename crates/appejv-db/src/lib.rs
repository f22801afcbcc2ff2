//! APPEJV Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - SurrealDB implementations of every `appejv-core` repository trait
//! - Error types ([`DbError`])

mod connection;
mod error;
mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use repository::{
    SurrealAuditLogRepository, SurrealCustomerRepository, SurrealOrderHistoryRepository,
    SurrealOrderRepository, SurrealProfileRepository,
};
pub use schema::{run_migrations, schema_v1};
