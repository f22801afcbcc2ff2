//! SurrealDB implementation of [`OrderRepository`].
//!
//! `update_status` is the concurrency-sensitive operation: the write
//! carries the caller's expected status as a predicate, so of two
//! racing transitions only one can match and succeed.

use std::str::FromStr;

use appejv_core::error::AppejvResult;
use appejv_core::models::order::{CreateOrder, Order, OrderStatus};
use appejv_core::repository::{OrderRepository, PaginatedResult, Pagination, Visibility};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::parse_uuid;

#[derive(Debug, SurrealValue)]
struct OrderRow {
    customer_id: Option<String>,
    sale_id: String,
    status: String,
    total_amount: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct OrderRowWithId {
    record_id: String,
    customer_id: Option<String>,
    sale_id: String,
    status: String,
    total_amount: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

impl OrderRow {
    fn into_order(self, id: Uuid) -> Result<Order, DbError> {
        let customer_id = self
            .customer_id
            .as_deref()
            .map(|c| parse_uuid(c, "customer"))
            .transpose()?;
        Ok(Order {
            id,
            customer_id,
            sale_id: parse_uuid(&self.sale_id, "sale")?,
            status: OrderStatus::from_str(&self.status)
                .map_err(|e| DbError::Decode(e.to_string()))?,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrderRowWithId {
    fn try_into_order(self) -> Result<Order, DbError> {
        let id = parse_uuid(&self.record_id, "order")?;
        OrderRow {
            customer_id: self.customer_id,
            sale_id: self.sale_id,
            status: self.status,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_order(id)
    }
}

/// SurrealDB implementation of the Order repository.
#[derive(Clone)]
pub struct SurrealOrderRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrderRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrderRepository for SurrealOrderRepository<C> {
    async fn create(&self, input: CreateOrder) -> AppejvResult<Order> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('orders', $id) SET \
                 customer_id = $customer_id, \
                 sale_id = $sale_id, \
                 status = 'draft', \
                 total_amount = $total_amount",
            )
            .bind(("id", id_str.clone()))
            .bind(("customer_id", input.customer_id.map(|c| c.to_string())))
            .bind(("sale_id", input.sale_id.to_string()))
            .bind(("total_amount", input.total_amount))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "orders".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> AppejvResult<Order> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('orders', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "orders".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> AppejvResult<Order> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('orders', $id) SET \
                 status = $new_status, updated_at = time::now() \
                 WHERE status = $expected_status",
            )
            .bind(("id", id_str.clone()))
            .bind(("new_status", new.as_str().to_string()))
            .bind(("expected_status", expected.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        if let Some(row) = rows.into_iter().next() {
            return Ok(row.into_order(id)?);
        }

        // The predicate did not match. Distinguish a missing order from
        // one whose status moved underneath the caller.
        let mut probe = self
            .db
            .query("SELECT * FROM type::record('orders', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let existing: Vec<OrderRow> = probe.take(0).map_err(DbError::from)?;

        if existing.is_empty() {
            Err(DbError::NotFound {
                entity: "orders".into(),
                id: id_str,
            }
            .into())
        } else {
            Err(DbError::Conflict {
                entity: "orders".into(),
                id: id_str,
            }
            .into())
        }
    }

    async fn list_visible(
        &self,
        visibility: &Visibility,
        pagination: Pagination,
    ) -> AppejvResult<PaginatedResult<Order>> {
        let owner_ids: Vec<String> = match visibility {
            Visibility::Denied => return Ok(PaginatedResult::empty(&pagination)),
            Visibility::Unrestricted => Vec::new(),
            Visibility::Only(ids) => ids.iter().map(|u| u.to_string()).collect(),
        };

        let filter = if matches!(visibility, Visibility::Only(_)) {
            " WHERE sale_id IN $owner_ids"
        } else {
            ""
        };

        let mut count_result = self
            .db
            .query(format!(
                "SELECT count() AS total FROM orders{filter} GROUP ALL"
            ))
            .bind(("owner_ids", owner_ids.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM orders{filter} \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset"
            ))
            .bind(("owner_ids", owner_ids))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_order())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
