//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. The two history tables are
//! append-only at the store level: their PERMISSIONS forbid update
//! and delete outright.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Profiles (one row per system actor)
-- =======================================================================
DEFINE TABLE profiles SCHEMAFULL;
DEFINE FIELD role ON TABLE profiles TYPE string \
    ASSERT $value IN ['admin', 'sale_admin', 'sale', 'warehouse', \
    'customer'];
DEFINE FIELD manager_id ON TABLE profiles TYPE option<string>;
DEFINE FIELD full_name ON TABLE profiles TYPE string;
DEFINE FIELD phone ON TABLE profiles TYPE option<string>;
DEFINE FIELD created_at ON TABLE profiles TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_profiles_manager ON TABLE profiles \
    COLUMNS manager_id;

-- =======================================================================
-- Customers
-- =======================================================================
DEFINE TABLE customers SCHEMAFULL;
DEFINE FIELD full_name ON TABLE customers TYPE string;
DEFINE FIELD phone ON TABLE customers TYPE option<string>;
DEFINE FIELD address ON TABLE customers TYPE option<string>;
DEFINE FIELD assigned_to ON TABLE customers TYPE option<string>;
DEFINE FIELD created_at ON TABLE customers TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_customers_assignee ON TABLE customers \
    COLUMNS assigned_to;

-- =======================================================================
-- Orders
-- =======================================================================
DEFINE TABLE orders SCHEMAFULL;
DEFINE FIELD customer_id ON TABLE orders TYPE option<string>;
DEFINE FIELD sale_id ON TABLE orders TYPE string;
DEFINE FIELD status ON TABLE orders TYPE string \
    ASSERT $value IN ['draft', 'ordered', 'shipping', 'paid', \
    'completed', 'cancelled'];
DEFINE FIELD total_amount ON TABLE orders TYPE float;
DEFINE FIELD created_at ON TABLE orders TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE orders TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_orders_sale ON TABLE orders COLUMNS sale_id;
DEFINE INDEX idx_orders_status ON TABLE orders COLUMNS status;

-- =======================================================================
-- Order History (append-only)
-- =======================================================================
DEFINE TABLE order_history SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD order_id ON TABLE order_history TYPE string;
DEFINE FIELD user_id ON TABLE order_history TYPE string;
DEFINE FIELD action_type ON TABLE order_history TYPE string \
    ASSERT $value IN ['created', 'status_change', 'comment'];
DEFINE FIELD old_value ON TABLE order_history TYPE option<string>;
DEFINE FIELD new_value ON TABLE order_history TYPE option<string>;
DEFINE FIELD comment ON TABLE order_history TYPE option<string>;
DEFINE FIELD created_at ON TABLE order_history TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_history_order_time ON TABLE order_history \
    COLUMNS order_id, created_at;

-- =======================================================================
-- Security Audit Log (append-only, global)
-- =======================================================================
DEFINE TABLE audit_logs SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD event_type ON TABLE audit_logs TYPE string \
    ASSERT $value IN ['LOGIN_SUCCESS', 'LOGIN_FAILED', 'LOGOUT', \
    'PASSWORD_CHANGE', 'UNAUTHORIZED_ACCESS', 'RATE_LIMIT_EXCEEDED', \
    'SUSPICIOUS_ACTIVITY', 'DATA_ACCESS', 'DATA_MODIFICATION'];
DEFINE FIELD resource ON TABLE audit_logs TYPE option<string>;
DEFINE FIELD action ON TABLE audit_logs TYPE option<string>;
DEFINE FIELD user_email ON TABLE audit_logs TYPE option<string>;
DEFINE FIELD ip_address ON TABLE audit_logs TYPE option<string>;
DEFINE FIELD success ON TABLE audit_logs TYPE bool;
DEFINE FIELD error_message ON TABLE audit_logs TYPE option<string>;
DEFINE FIELD metadata ON TABLE audit_logs TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD timestamp ON TABLE audit_logs TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_audit_time ON TABLE audit_logs COLUMNS timestamp;
DEFINE INDEX idx_audit_event ON TABLE audit_logs COLUMNS event_type;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn append_only_tables_forbid_mutation() {
        for table in ["order_history", "audit_logs"] {
            let start = SCHEMA_V1
                .find(&format!("DEFINE TABLE {table} SCHEMAFULL"))
                .unwrap_or_else(|| panic!("{table} missing from schema"));
            let block = &SCHEMA_V1[start..start + 200];
            assert!(block.contains("FOR update NONE"), "{table}");
            assert!(block.contains("FOR delete NONE"), "{table}");
        }
    }
}
