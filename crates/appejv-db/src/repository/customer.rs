//! SurrealDB implementation of [`CustomerRepository`].

use appejv_core::error::AppejvResult;
use appejv_core::models::customer::{CreateCustomer, Customer};
use appejv_core::repository::{CustomerRepository, PaginatedResult, Pagination, Visibility};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::parse_uuid;

#[derive(Debug, SurrealValue)]
struct CustomerRow {
    full_name: String,
    phone: Option<String>,
    address: Option<String>,
    assigned_to: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CustomerRowWithId {
    record_id: String,
    full_name: String,
    phone: Option<String>,
    address: Option<String>,
    assigned_to: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

impl CustomerRow {
    fn into_customer(self, id: Uuid) -> Result<Customer, DbError> {
        let assigned_to = self
            .assigned_to
            .as_deref()
            .map(|a| parse_uuid(a, "assignee"))
            .transpose()?;
        Ok(Customer {
            id,
            full_name: self.full_name,
            phone: self.phone,
            address: self.address,
            assigned_to,
            created_at: self.created_at,
        })
    }
}

impl CustomerRowWithId {
    fn try_into_customer(self) -> Result<Customer, DbError> {
        let id = parse_uuid(&self.record_id, "customer")?;
        CustomerRow {
            full_name: self.full_name,
            phone: self.phone,
            address: self.address,
            assigned_to: self.assigned_to,
            created_at: self.created_at,
        }
        .into_customer(id)
    }
}

/// SurrealDB implementation of the Customer repository.
#[derive(Clone)]
pub struct SurrealCustomerRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCustomerRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CustomerRepository for SurrealCustomerRepository<C> {
    async fn create(&self, input: CreateCustomer) -> AppejvResult<Customer> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('customers', $id) SET \
                 full_name = $full_name, \
                 phone = $phone, \
                 address = $address, \
                 assigned_to = $assigned_to",
            )
            .bind(("id", id_str.clone()))
            .bind(("full_name", input.full_name))
            .bind(("phone", input.phone))
            .bind(("address", input.address))
            .bind(("assigned_to", input.assigned_to.map(|a| a.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<CustomerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "customers".into(),
            id: id_str,
        })?;

        Ok(row.into_customer(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> AppejvResult<Customer> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('customers', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "customers".into(),
            id: id_str,
        })?;

        Ok(row.into_customer(id)?)
    }

    async fn set_assignee(&self, id: Uuid, assigned_to: Option<Uuid>) -> AppejvResult<Customer> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('customers', $id) SET \
                 assigned_to = $assigned_to",
            )
            .bind(("id", id_str.clone()))
            .bind(("assigned_to", assigned_to.map(|a| a.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<CustomerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "customers".into(),
            id: id_str,
        })?;

        Ok(row.into_customer(id)?)
    }

    async fn list_visible(
        &self,
        visibility: &Visibility,
        pagination: Pagination,
    ) -> AppejvResult<PaginatedResult<Customer>> {
        let owner_ids: Vec<String> = match visibility {
            Visibility::Denied => return Ok(PaginatedResult::empty(&pagination)),
            Visibility::Unrestricted => Vec::new(),
            Visibility::Only(ids) => ids.iter().map(|u| u.to_string()).collect(),
        };

        let filter = if matches!(visibility, Visibility::Only(_)) {
            " WHERE assigned_to IN $owner_ids"
        } else {
            ""
        };

        let mut count_result = self
            .db
            .query(format!(
                "SELECT count() AS total FROM customers{filter} GROUP ALL"
            ))
            .bind(("owner_ids", owner_ids.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM customers{filter} \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset"
            ))
            .bind(("owner_ids", owner_ids))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomerRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_customer())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
