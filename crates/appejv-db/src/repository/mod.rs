//! SurrealDB repository implementations.

mod audit_log;
mod customer;
mod order;
mod order_history;
mod profile;

pub use audit_log::SurrealAuditLogRepository;
pub use customer::SurrealCustomerRepository;
pub use order::SurrealOrderRepository;
pub use order_history::SurrealOrderHistoryRepository;
pub use profile::SurrealProfileRepository;

use uuid::Uuid;

use crate::error::DbError;

pub(crate) fn parse_uuid(s: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}
