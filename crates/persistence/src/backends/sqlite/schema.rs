//! SQLite schema definitions.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
///
/// All DDL uses `CREATE ... IF NOT EXISTS`, so initialization is idempotent.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
        tracing::info!(version = SCHEMA_VERSION, "initialized provider schema");
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        "create schema_version table",
    )?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    execute(conn, "DELETE FROM schema_version", "clear schema_version")?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| schema_error(format!("Failed to set schema version: {}", e)))?;
    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS person (
            person_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            voided INTEGER NOT NULL DEFAULT 0,
            date_created TEXT NOT NULL
        )",
        "create person table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS person_name (
            person_name_id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL REFERENCES person(person_id) ON DELETE CASCADE,
            given_name TEXT,
            middle_name TEXT,
            family_name TEXT,
            family_name2 TEXT
        )",
        "create person_name table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS person_address (
            person_address_id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL REFERENCES person(person_id) ON DELETE CASCADE,
            address1 TEXT,
            address2 TEXT,
            address3 TEXT,
            address4 TEXT,
            address5 TEXT,
            address6 TEXT,
            city_village TEXT,
            country TEXT,
            county_district TEXT,
            state_province TEXT,
            postal_code TEXT
        )",
        "create person_address table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS person_attribute (
            person_attribute_id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL REFERENCES person(person_id) ON DELETE CASCADE,
            attribute_type TEXT NOT NULL,
            value TEXT NOT NULL
        )",
        "create person_attribute table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS provider_role (
            provider_role_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            retired INTEGER NOT NULL DEFAULT 0,
            date_created TEXT NOT NULL
        )",
        "create provider_role table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS provider_role_relationship_type (
            provider_role_id INTEGER NOT NULL REFERENCES provider_role(provider_role_id) ON DELETE CASCADE,
            relationship_type_id INTEGER NOT NULL,
            PRIMARY KEY (provider_role_id, relationship_type_id)
        )",
        "create provider_role_relationship_type table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS provider_role_supervisee (
            provider_role_id INTEGER NOT NULL REFERENCES provider_role(provider_role_id) ON DELETE CASCADE,
            supervisee_role_id INTEGER NOT NULL,
            PRIMARY KEY (provider_role_id, supervisee_role_id)
        )",
        "create provider_role_supervisee table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS provider (
            provider_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            person_id INTEGER NOT NULL REFERENCES person(person_id) ON DELETE CASCADE,
            provider_role_id INTEGER REFERENCES provider_role(provider_role_id),
            identifier TEXT,
            retired INTEGER NOT NULL DEFAULT 0,
            date_created TEXT NOT NULL
        )",
        "create provider table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS provider_suggestion (
            provider_suggestion_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            relationship_type_id INTEGER NOT NULL,
            evaluator TEXT NOT NULL,
            criteria TEXT NOT NULL,
            retired INTEGER NOT NULL DEFAULT 0,
            date_created TEXT NOT NULL
        )",
        "create provider_suggestion table",
    )?;

    execute(
        conn,
        "CREATE TABLE IF NOT EXISTS supervision_suggestion (
            supervision_suggestion_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            provider_role_id INTEGER NOT NULL,
            suggestion_type TEXT NOT NULL,
            evaluator TEXT NOT NULL,
            criteria TEXT NOT NULL,
            retired INTEGER NOT NULL DEFAULT 0,
            date_created TEXT NOT NULL
        )",
        "create supervision_suggestion table",
    )?;

    // Indexes for the joins the search query makes
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_person_name_person ON person_name(person_id)",
        "create person_name index",
    )?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_person_address_person ON person_address(person_id)",
        "create person_address index",
    )?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_provider_person ON provider(person_id)",
        "create provider person index",
    )?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_provider_role ON provider(provider_role_id)",
        "create provider role index",
    )?;

    Ok(())
}

fn execute(conn: &Connection, sql: &str, what: &str) -> StorageResult<()> {
    conn.execute(sql, [])
        .map(|_| ())
        .map_err(|e| schema_error(format!("Failed to {}: {}", what, e)))
}

fn schema_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_schema() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        // All tables exist
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN (
                    'person', 'person_name', 'person_address', 'person_attribute',
                    'provider_role', 'provider_role_relationship_type',
                    'provider_role_supervisee', 'provider',
                    'provider_suggestion', 'supervision_suggestion'
                )",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 10);
    }

    #[test]
    fn test_initialize_schema_twice() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
    }
}
