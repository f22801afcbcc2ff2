//! SurrealDB implementation of [`ProfileRepository`].

use std::str::FromStr;

use appejv_core::error::AppejvResult;
use appejv_core::models::profile::{CreateProfile, Profile, Role, TeamRoster};
use appejv_core::repository::{PaginatedResult, Pagination, ProfileRepository};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::parse_uuid;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ProfileRow {
    role: String,
    manager_id: Option<String>,
    full_name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ProfileRowWithId {
    record_id: String,
    role: String,
    manager_id: Option<String>,
    full_name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

/// Row struct for queries that only need the record ID.
#[derive(Debug, SurrealValue)]
struct IdRow {
    record_id: String,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

impl ProfileRow {
    fn into_profile(self, id: Uuid) -> Result<Profile, DbError> {
        let manager_id = self
            .manager_id
            .as_deref()
            .map(|m| parse_uuid(m, "manager"))
            .transpose()?;
        Ok(Profile {
            id,
            role: Role::from_str(&self.role).map_err(|e| DbError::Decode(e.to_string()))?,
            manager_id,
            full_name: self.full_name,
            phone: self.phone,
            created_at: self.created_at,
        })
    }
}

impl ProfileRowWithId {
    fn try_into_profile(self) -> Result<Profile, DbError> {
        let id = parse_uuid(&self.record_id, "profile")?;
        ProfileRow {
            role: self.role,
            manager_id: self.manager_id,
            full_name: self.full_name,
            phone: self.phone,
            created_at: self.created_at,
        }
        .into_profile(id)
    }
}

/// SurrealDB implementation of the Profile repository.
#[derive(Clone)]
pub struct SurrealProfileRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProfileRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProfileRepository for SurrealProfileRepository<C> {
    async fn create(&self, input: CreateProfile) -> AppejvResult<Profile> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('profiles', $id) SET \
                 role = $role, \
                 manager_id = $manager_id, \
                 full_name = $full_name, \
                 phone = $phone",
            )
            .bind(("id", id_str.clone()))
            .bind(("role", input.role.as_str().to_string()))
            .bind(("manager_id", input.manager_id.map(|m| m.to_string())))
            .bind(("full_name", input.full_name))
            .bind(("phone", input.phone))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "profiles".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> AppejvResult<Profile> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('profiles', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "profiles".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id)?)
    }

    async fn delete(&self, id: Uuid) -> AppejvResult<()> {
        let id_str = id.to_string();

        self.db
            .query("DELETE type::record('profiles', $id)")
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> AppejvResult<PaginatedResult<Profile>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM profiles GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM profiles \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProfileRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_profile())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_team(&self, manager_id: Uuid) -> AppejvResult<TeamRoster> {
        let manager_id_str = manager_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id FROM profiles \
                 WHERE manager_id = $manager_id",
            )
            .bind(("manager_id", manager_id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<IdRow> = result.take(0).map_err(DbError::from)?;

        let roster = rows
            .into_iter()
            .map(|row| parse_uuid(&row.record_id, "profile"))
            .collect::<Result<TeamRoster, DbError>>()?;

        Ok(roster)
    }
}
