//! SurrealDB implementation of [`OrderHistoryRepository`].
//!
//! The backing table is append-only: schema permissions forbid update
//! and delete, so an entry once written is immutable.

use std::str::FromStr;

use appejv_core::error::AppejvResult;
use appejv_core::models::order::OrderStatus;
use appejv_core::models::order_history::{
    ActionType, CreateOrderHistoryEntry, OrderHistoryEntry,
};
use appejv_core::repository::OrderHistoryRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::parse_uuid;

#[derive(Debug, SurrealValue)]
struct HistoryRow {
    order_id: String,
    user_id: String,
    action_type: String,
    old_value: Option<String>,
    new_value: Option<String>,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct HistoryRowWithId {
    record_id: String,
    order_id: String,
    user_id: String,
    action_type: String,
    old_value: Option<String>,
    new_value: Option<String>,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

fn parse_status_opt(value: Option<&str>) -> Result<Option<OrderStatus>, DbError> {
    value
        .map(|s| OrderStatus::from_str(s).map_err(|e| DbError::Decode(e.to_string())))
        .transpose()
}

impl HistoryRow {
    fn into_entry(self, id: Uuid) -> Result<OrderHistoryEntry, DbError> {
        Ok(OrderHistoryEntry {
            id,
            order_id: parse_uuid(&self.order_id, "order")?,
            user_id: parse_uuid(&self.user_id, "user")?,
            action_type: ActionType::from_str(&self.action_type)
                .map_err(|e| DbError::Decode(e.to_string()))?,
            old_value: parse_status_opt(self.old_value.as_deref())?,
            new_value: parse_status_opt(self.new_value.as_deref())?,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

impl HistoryRowWithId {
    fn try_into_entry(self) -> Result<OrderHistoryEntry, DbError> {
        let id = parse_uuid(&self.record_id, "history entry")?;
        HistoryRow {
            order_id: self.order_id,
            user_id: self.user_id,
            action_type: self.action_type,
            old_value: self.old_value,
            new_value: self.new_value,
            comment: self.comment,
            created_at: self.created_at,
        }
        .into_entry(id)
    }
}

/// SurrealDB implementation of the OrderHistory repository.
#[derive(Clone)]
pub struct SurrealOrderHistoryRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrderHistoryRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrderHistoryRepository for SurrealOrderHistoryRepository<C> {
    async fn append(&self, input: CreateOrderHistoryEntry) -> AppejvResult<OrderHistoryEntry> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('order_history', $id) SET \
                 order_id = $order_id, \
                 user_id = $user_id, \
                 action_type = $action_type, \
                 old_value = $old_value, \
                 new_value = $new_value, \
                 comment = $comment",
            )
            .bind(("id", id_str.clone()))
            .bind(("order_id", input.order_id.to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("action_type", input.action_type.as_str().to_string()))
            .bind(("old_value", input.old_value.map(|s| s.as_str().to_string())))
            .bind(("new_value", input.new_value.map(|s| s.as_str().to_string())))
            .bind(("comment", input.comment))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<HistoryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order_history".into(),
            id: id_str,
        })?;

        Ok(row.into_entry(id)?)
    }

    async fn list_for_order(&self, order_id: Uuid) -> AppejvResult<Vec<OrderHistoryEntry>> {
        let order_id_str = order_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM order_history \
                 WHERE order_id = $order_id \
                 ORDER BY created_at ASC",
            )
            .bind(("order_id", order_id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HistoryRowWithId> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(|row| row.try_into_entry())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }
}
