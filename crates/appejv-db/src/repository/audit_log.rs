//! SurrealDB implementation of [`AuditLogRepository`].
//!
//! Append-only like order history. The query side serves the operator
//! review surface: newest-first within a bounded window, with optional
//! filters on event type, outcome, resource, and a free-text search
//! over the identifying columns.

use std::str::FromStr;

use appejv_core::error::AppejvResult;
use appejv_core::models::audit::{AuditEventType, AuditLogEntry, CreateAuditLogEntry};
use appejv_core::repository::{AuditLogFilter, AuditLogRepository};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::parse_uuid;

#[derive(Debug, SurrealValue)]
struct AuditRow {
    event_type: String,
    resource: Option<String>,
    action: Option<String>,
    user_email: Option<String>,
    ip_address: Option<String>,
    success: bool,
    error_message: Option<String>,
    metadata: serde_json::Value,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct AuditRowWithId {
    record_id: String,
    event_type: String,
    resource: Option<String>,
    action: Option<String>,
    user_email: Option<String>,
    ip_address: Option<String>,
    success: bool,
    error_message: Option<String>,
    metadata: serde_json::Value,
    timestamp: DateTime<Utc>,
}

impl AuditRow {
    fn into_entry(self, id: Uuid) -> Result<AuditLogEntry, DbError> {
        Ok(AuditLogEntry {
            id,
            event_type: AuditEventType::from_str(&self.event_type)
                .map_err(|e| DbError::Decode(e.to_string()))?,
            resource: self.resource,
            action: self.action,
            user_email: self.user_email,
            ip_address: self.ip_address,
            success: self.success,
            error_message: self.error_message,
            metadata: self.metadata,
            timestamp: self.timestamp,
        })
    }
}

impl AuditRowWithId {
    fn try_into_entry(self) -> Result<AuditLogEntry, DbError> {
        let id = parse_uuid(&self.record_id, "audit entry")?;
        AuditRow {
            event_type: self.event_type,
            resource: self.resource,
            action: self.action,
            user_email: self.user_email,
            ip_address: self.ip_address,
            success: self.success,
            error_message: self.error_message,
            metadata: self.metadata,
            timestamp: self.timestamp,
        }
        .into_entry(id)
    }
}

/// SurrealDB implementation of the AuditLog repository.
#[derive(Clone)]
pub struct SurrealAuditLogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAuditLogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AuditLogRepository for SurrealAuditLogRepository<C> {
    async fn append(&self, input: CreateAuditLogEntry) -> AppejvResult<AuditLogEntry> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('audit_logs', $id) SET \
                 event_type = $event_type, \
                 resource = $resource, \
                 action = $action, \
                 user_email = $user_email, \
                 ip_address = $ip_address, \
                 success = $success, \
                 error_message = $error_message, \
                 metadata = $metadata",
            )
            .bind(("id", id_str.clone()))
            .bind(("event_type", input.event_type.as_str().to_string()))
            .bind(("resource", input.resource))
            .bind(("action", input.action))
            .bind(("user_email", input.user_email))
            .bind(("ip_address", input.ip_address))
            .bind(("success", input.success))
            .bind(("error_message", input.error_message))
            .bind(("metadata", input.metadata))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "audit_logs".into(),
            id: id_str,
        })?;

        Ok(row.into_entry(id)?)
    }

    async fn query(&self, filter: AuditLogFilter) -> AppejvResult<Vec<AuditLogEntry>> {
        let mut conditions = Vec::new();
        if filter.success.is_some() {
            conditions.push("success = $success");
        }
        if filter.resource.is_some() {
            conditions.push("resource = $resource");
        }
        if filter.event_type.is_some() {
            conditions.push(
                "string::contains(string::lowercase(event_type), \
                 string::lowercase($event_type))",
            );
        }
        if filter.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(event_type), $search) \
                 OR string::contains(string::lowercase(user_email ?? ''), $search) \
                 OR string::contains(string::lowercase(resource ?? ''), $search) \
                 OR string::contains(string::lowercase(action ?? ''), $search))",
            );
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM audit_logs{where_clause} \
             ORDER BY timestamp DESC LIMIT $limit"
        );

        let mut builder = self.db.query(&query).bind(("limit", filter.limit));

        if let Some(success) = filter.success {
            builder = builder.bind(("success", success));
        }
        if let Some(resource) = filter.resource {
            builder = builder.bind(("resource", resource));
        }
        if let Some(event_type) = filter.event_type {
            builder = builder.bind(("event_type", event_type));
        }
        if let Some(search) = filter.search {
            builder = builder.bind(("search", search.to_lowercase()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<AuditRowWithId> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(|row| row.try_into_entry())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }
}
