//! # Pokedex Database
//!
//! Single SQLite file at `.pokedex/pokedex.db`. Durable state is a handful
//! of string values keyed by name, so the schema is one `kv_store` table.

use super::io::get_runtime_path;
use crate::error::DexResult;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Schema version for migrations
const SCHEMA_VERSION: i32 = 1;

pub const DB_FILE: &str = "pokedex.db";

pub struct DexDb {
    conn: Arc<Mutex<Connection>>,
}

impl DexDb {
    /// Open or create the database inside the runtime directory
    pub fn open() -> Result<Self> {
        Self::open_at(get_runtime_path().join(DB_FILE))
    }

    /// Open database at a specific path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open pokedex database at {:?}", path.as_ref()))?;
        Self::from_connection(conn)
    }

    /// Throwaway database, nothing touches disk
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.lock();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
            [],
        )?;

        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if current_version < 1 {
            Self::migrate_v1(&conn)?;
            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                [1],
            )?;
            tracing::info!("DexDb initialized with schema version {}", SCHEMA_VERSION);
        }

        Ok(())
    }

    fn migrate_v1(conn: &Connection) -> Result<()> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
            [],
        )?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> DexResult<Option<String>> {
        let conn = self.lock();
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert a value
    pub fn kv_set(&self, key: &str, value: &str) -> DexResult<()> {
        let conn = self.lock();
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "kv_store write");
        Ok(())
    }
}
