//! Read-only access to the voice memo database.
//!
//! The recording database is opened through a `SqlitePool` driven by an embedded
//! single-threaded runtime, so the rest of the crate stays synchronous. Rows come
//! back as [`DbRow`], a column-keyed mapping decoded by each value's storage class.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::future::Future;
use std::path::Path;
use tokio::runtime::Runtime;

use crate::error::{BackupError, Result};
use crate::queries::introspection;

/// A single SQLite value, tagged by storage class
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One result row: column names to values, in select order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DbRow {
    columns: Vec<(String, DbValue)>,
}

impl DbRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used when assembling rows by hand
    pub fn with(mut self, column: &str, value: DbValue) -> Self {
        self.columns.push((column.to_string(), value));
        self
    }

    pub fn get(&self, column: &str) -> Option<&DbValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Text value of a column; None when the column is absent or NULL
    pub fn text(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            DbValue::Text(s) => Some(s.clone()),
            DbValue::Integer(i) => Some(i.to_string()),
            DbValue::Real(r) => Some(r.to_string()),
            DbValue::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
            DbValue::Null => None,
        }
    }

    /// Floating point value of a column; integer storage is widened
    pub fn real(&self, column: &str) -> Option<f64> {
        match self.get(column)? {
            DbValue::Real(r) => Some(*r),
            DbValue::Integer(i) => Some(*i as f64),
            DbValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Integer value of a column; real values are accepted only when integral
    pub fn integer(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            DbValue::Integer(i) => Some(*i),
            DbValue::Real(r) if r.fract() == 0.0 => Some(*r as i64),
            DbValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Column description as reported by PRAGMA table_info
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    /// Position within the primary key (0 = not part of it)
    pub primary_key: i64,
}

/// Decode a sqlx row into a [`DbRow`] using the runtime type of each value
fn decode_row(row: &SqliteRow) -> std::result::Result<DbRow, sqlx::Error> {
    let mut decoded = DbRow::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let storage = {
            let raw = row.try_get_raw(idx)?;
            if raw.is_null() {
                None
            } else {
                Some(raw.type_info().name().to_string())
            }
        };

        let value = match storage.as_deref() {
            None => DbValue::Null,
            Some("INTEGER") => DbValue::Integer(row.try_get(idx)?),
            Some("REAL") => DbValue::Real(row.try_get(idx)?),
            Some("BLOB") => DbValue::Blob(row.try_get(idx)?),
            Some(_) => DbValue::Text(row.try_get(idx)?),
        };
        decoded = decoded.with(column.name(), value);
    }
    Ok(decoded)
}

/// Open a read-only connection pool on an existing database file
pub async fn open_readonly_connection(
    db_path: &Path,
) -> std::result::Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

/// Synchronous SQLite database wrapper that owns a runtime for blocking operations.
pub struct SyncDb {
    pool: SqlitePool,
    runtime: Runtime,
}

impl SyncDb {
    /// Open the database at `db_path` read-only
    pub fn connect(db_path: &Path) -> Result<Self> {
        if !db_path.is_file() {
            return Err(BackupError::Database(format!(
                "Database file not found at {}",
                db_path.display()
            )));
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackupError::io(db_path, e))?;
        let pool = runtime
            .block_on(open_readonly_connection(db_path))
            .map_err(|e| {
                BackupError::Database(format!(
                    "Error connecting to database at {}: {}",
                    db_path.display(),
                    e
                ))
            })?;

        Ok(Self { pool, runtime })
    }

    /// Block on an async future using the embedded runtime
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run a query and return every row
    pub fn fetch_all(&self, sql: &str) -> Result<Vec<DbRow>> {
        let rows = self
            .block_on(sqlx::query(sql).fetch_all(&self.pool))
            .map_err(|e| BackupError::Database(format!("Error executing '{}': {}", sql, e)))?;

        rows.iter()
            .map(|row| decode_row(row).map_err(BackupError::from))
            .collect()
    }

    /// Names of all tables in the database
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let sql = introspection::select_table_names();
        let rows = self.fetch_all(&sql)?;
        Ok(rows.iter().filter_map(|row| row.text("name")).collect())
    }

    /// Column layout of one table
    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let sql = introspection::table_info(table);
        let rows = self.fetch_all(&sql)?;
        Ok(rows
            .iter()
            .map(|row| ColumnInfo {
                name: row.text("name").unwrap_or_default(),
                declared_type: row.text("type").unwrap_or_default(),
                not_null: row.integer("notnull").unwrap_or(0) != 0,
                primary_key: row.integer("pk").unwrap_or(0),
            })
            .collect())
    }

    /// Close the pool and shut the runtime down
    pub fn close(self) {
        let SyncDb { pool, runtime } = self;
        runtime.block_on(pool.close());
    }
}
