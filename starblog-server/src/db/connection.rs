use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use super::schema::{DROP_SCHEMA, SCHEMA, SEED_DATA, TABLES};

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Every connection handed out by the pool has foreign key enforcement
    /// switched on, so cascades and reference checks happen in SQLite.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let manager = Self::create_connection_manager(&path)?
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

        let pool = if Self::is_memory_path(&path) {
            // Each SQLite memory connection is its own database, so the pool
            // must hold exactly one connection and never recycle it.
            Pool::builder()
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .build(manager)
        } else {
            Pool::new(manager)
        }
        .context("Failed to create database connection pool")?;

        Ok(Self { pool })
    }

    fn is_memory_path<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .to_string_lossy()
            .trim()
            .eq_ignore_ascii_case(MEMORY_DB_PATH)
    }

    /// Create appropriate connection manager based on path
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    fn create_connection_manager<P: AsRef<Path>>(path: P) -> Result<SqliteConnectionManager> {
        if Self::is_memory_path(&path) {
            Ok(SqliteConnectionManager::memory())
        } else {
            Ok(SqliteConnectionManager::file(path))
        }
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> Result<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    /// Seed the database with demo data
    pub fn seed_test_data(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SEED_DATA)
            .context("Failed to seed test data")?;
        Ok(())
    }

    /// Drop every table and recreate an empty schema
    pub fn reset(&self) -> Result<()> {
        {
            let conn = self.connection()?;
            conn.execute_batch(DROP_SCHEMA)
                .context("Failed to drop database schema")?;
        }
        self.initialize()
    }

    /// Row count for each table, in creation order
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        let conn = self.connection()?;
        TABLES
            .iter()
            .map(|table| {
                let count: i64 = conn
                    .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                        row.get(0)
                    })
                    .with_context(|| format!("Failed to count rows in {}", table))?;
                Ok::<_, anyhow::Error>((*table, count))
            })
            .collect()
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}
