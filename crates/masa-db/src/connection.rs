//! # Database Connection
//!
//! A single SQLite connection with an explicit open/close lifecycle and
//! table-agnostic, parameterized CRUD statements.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Connection State Machine                           │
//! │                                                                         │
//! │              open() / scope enter                                       │
//! │   ┌────────┐ ─────────────────────────► ┌────────┐                      │
//! │   │ Closed │                            │  Open  │ ◄── open() again:    │
//! │   └────────┘ ◄───────────────────────── └────────┘     warn, no-op      │
//! │       ▲       close() / scope exit                                      │
//! │       │       (commits pending work)                                    │
//! │       └── close() again: warn, no-op                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commit Boundaries
//! ```text
//! insert  ──► execute ──► COMMIT (also flushes staged update/delete)
//! update  ──► BEGIN (if none pending) ──► execute ──► staged
//! delete  ──► BEGIN (if none pending) ──► execute ──► staged
//! commit  ──► COMMIT staged work
//! rollback──► ROLLBACK staged work
//! close   ──► COMMIT staged work ──► release connection
//! ```
//!
//! No pool: the counter is one process, one operator, one connection.

use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteJournalMode,
    SqliteQueryResult, SqliteRow, SqliteSynchronous,
};
use sqlx::{ConnectOptions, Connection, Row as _, Sqlite, TypeInfo, ValueRef};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::schema::{assignments, column_list, placeholders, values, Row, Table, Value};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("customers.db")
///     .journal_mode(SqliteJournalMode::Delete)
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file. Created on first open.
    pub database_path: PathBuf,

    /// Default: WAL
    pub journal_mode: SqliteJournalMode,

    /// Whether SQLite enforces foreign keys.
    /// Default: true
    pub foreign_keys: bool,

    /// How long to wait on a locked database file.
    /// Default: 5 seconds
    pub busy_timeout: Duration,
}

impl DbConfig {
    /// Creates a configuration for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            journal_mode: SqliteJournalMode::Wal,
            foreign_keys: true,
            busy_timeout: Duration::from_secs(5),
        }
    }

    pub fn journal_mode(mut self, mode: SqliteJournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.database_path)
            .create_if_missing(true)
            .journal_mode(self.journal_mode)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on power loss
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(self.foreign_keys)
            .busy_timeout(self.busy_timeout)
    }
}

// =============================================================================
// Scoped Acquisition
// =============================================================================

/// Future returned by a scope body. Borrows the open database for `'c`.
pub type ScopeFuture<'c, T> = Pin<Box<dyn Future<Output = DbResult<T>> + Send + 'c>>;

// =============================================================================
// Database
// =============================================================================

/// Handle to the local store.
///
/// ## Usage
/// ```rust,ignore
/// let rows = Database::scoped(DbConfig::new("customers.db"), |db| {
///     Box::pin(async move { db.search::<Invoices>(&[]).await })
/// })
/// .await?;
/// ```
#[derive(Debug)]
pub struct Database {
    config: DbConfig,
    /// `Some` while open. The connection is also the statement executor.
    connection: Option<SqliteConnection>,
    /// A BEGIN has been issued and not yet committed or rolled back.
    in_transaction: bool,
}

impl Database {
    /// Creates a closed handle. Nothing touches the disk until [`open`](Self::open).
    pub fn new(config: DbConfig) -> Self {
        Database {
            config,
            connection: None,
            in_transaction: false,
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Whether update/delete work is staged and waiting for a commit.
    pub fn has_pending_transaction(&self) -> bool {
        self.in_transaction
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Opens the connection, creating the database file if needed.
    ///
    /// Already open: logs a warning and keeps the existing connection.
    pub async fn open(&mut self) -> DbResult<()> {
        let path = self.config.database_path.display().to_string();

        if self.connection.is_some() {
            warn!(path = %path, "Database connection is already open");
            return Ok(());
        }

        let connection = self
            .config
            .connect_options()
            .connect()
            .await
            .map_err(|e| {
                error!(path = %path, error = %e, "Failed to open database");
                DbError::ConnectionFailed(e.to_string())
            })?;

        self.connection = Some(connection);
        self.in_transaction = false;

        info!(path = %path, "Database connection opened");
        Ok(())
    }

    /// Commits pending work and releases the connection.
    ///
    /// Already closed: logs a warning and returns `Ok`.
    /// The handle is closed afterwards even if the commit fails; in that case
    /// SQLite discards the staged work and the commit error is returned.
    pub async fn close(&mut self) -> DbResult<()> {
        if self.connection.is_none() {
            warn!("Database connection is already closed");
            return Ok(());
        }

        let committed = self.commit().await;

        let closed = match self.connection.take() {
            Some(connection) => connection.close().await.map_err(|e| {
                error!(error = %e, "Failed to close database connection");
                DbError::ConnectionFailed(e.to_string())
            }),
            None => Ok(()),
        };
        self.in_transaction = false;

        committed?;
        closed?;

        info!(
            path = %self.config.database_path.display(),
            "Database connection closed"
        );
        Ok(())
    }

    /// Runs `body` between [`open`](Self::open) and [`close`](Self::close).
    ///
    /// `close` runs on every exit path. When the body fails its error wins;
    /// a close failure is then only logged.
    pub async fn scope<T, F>(&mut self, body: F) -> DbResult<T>
    where
        F: for<'c> FnOnce(&'c mut Database) -> ScopeFuture<'c, T>,
    {
        self.open().await?;

        let outcome = body(&mut *self).await;
        let closed = self.close().await;

        match (outcome, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                error!(error = %close_err, "Failed to close database after scope error");
                Err(err)
            }
        }
    }

    /// [`scope`](Self::scope) on a fresh handle.
    pub async fn scoped<T, F>(config: DbConfig, body: F) -> DbResult<T>
    where
        F: for<'c> FnOnce(&'c mut Database) -> ScopeFuture<'c, T>,
    {
        Database::new(config).scope(body).await
    }

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------

    /// Commits staged work.
    ///
    /// Not connected: logs a warning and returns `Ok`.
    pub async fn commit(&mut self) -> DbResult<()> {
        self.end_transaction("COMMIT").await
    }

    /// Discards staged work.
    ///
    /// Not connected: logs a warning and returns `Ok`.
    pub async fn rollback(&mut self) -> DbResult<()> {
        self.end_transaction("ROLLBACK").await
    }

    async fn end_transaction(&mut self, statement: &'static str) -> DbResult<()> {
        let Some(connection) = self.connection.as_mut() else {
            warn!(statement, "No active connection");
            return Ok(());
        };

        if !self.in_transaction {
            return Ok(());
        }

        sqlx::query(statement)
            .execute(&mut *connection)
            .await
            .map_err(|e| {
                error!(statement, error = %e, "Transaction statement failed");
                DbError::TransactionFailed(e.to_string())
            })?;
        self.in_transaction = false;

        debug!(statement, "Transaction finished");
        Ok(())
    }

    async fn begin_if_needed(&mut self) -> DbResult<()> {
        if self.in_transaction {
            return Ok(());
        }

        let connection = self.connection()?;
        sqlx::query("BEGIN")
            .execute(&mut *connection)
            .await
            .map_err(|e| {
                error!(error = %e, "BEGIN failed");
                DbError::TransactionFailed(e.to_string())
            })?;
        self.in_transaction = true;

        debug!("Transaction started");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Statements
    // -------------------------------------------------------------------------

    /// Inserts one row and commits immediately.
    ///
    /// ```text
    /// INSERT INTO <table> (<cols>) VALUES (?, ?, …)
    /// ```
    ///
    /// Also commits anything staged by earlier update/delete calls.
    /// Returns the new rowid.
    pub async fn insert<T: Table>(&mut self, row: &[(T::Column, Value)]) -> DbResult<i64> {
        let sql = if row.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", T::NAME)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                T::NAME,
                column_list(row),
                placeholders(row.len())
            )
        };
        let params: Vec<Value> = values(row).collect();

        let result = self.run(&sql, &params).await?;
        self.commit().await?;

        let row_id = result.last_insert_rowid();
        info!(table = T::NAME, row_id, "Inserted row");
        Ok(row_id)
    }

    /// Runs any parameterized statement and returns every row.
    pub async fn query(&mut self, sql: &str, params: &[Value]) -> DbResult<Vec<Row>> {
        let connection = self.connection()?;

        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&mut *connection)
            .await
            .map_err(|e| {
                error!(sql, ?params, error = %e, "Query failed");
                DbError::from(e)
            })?;

        let rows = rows.iter().map(decode_row).collect::<DbResult<Vec<_>>>()?;

        debug!(sql, ?params, rows = rows.len(), "Query returned rows");
        Ok(rows)
    }

    /// Runs a statement that returns no rows (DDL, PRAGMA, ad-hoc DML).
    /// Returns rows affected.
    pub async fn execute(&mut self, sql: &str, params: &[Value]) -> DbResult<u64> {
        Ok(self.run(sql, params).await?.rows_affected())
    }

    /// Selects rows matching every `column = value` pair of `filter`.
    ///
    /// ```text
    /// SELECT * FROM <table> [WHERE a = ? AND b = ?]
    /// ```
    ///
    /// An empty filter returns the whole table.
    pub async fn search<T: Table>(&mut self, filter: &[(T::Column, Value)]) -> DbResult<Vec<Row>> {
        let mut sql = format!("SELECT * FROM {}", T::NAME);
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&assignments(filter, " AND "));
        }
        let params: Vec<Value> = values(filter).collect();

        self.query(&sql, &params).await
    }

    /// Updates matching rows. Staged until commit/close.
    ///
    /// ```text
    /// UPDATE <table> SET a = ?, b = ? WHERE c = ? AND d = ?
    ///                    ─── set ───        ─── filter ───   (binding order)
    /// ```
    pub async fn update<T: Table>(
        &mut self,
        set: &[(T::Column, Value)],
        filter: &[(T::Column, Value)],
    ) -> DbResult<u64> {
        self.connection()?;

        if filter.is_empty() {
            return Err(DbError::EmptyFilter {
                operation: "update",
                table: T::NAME,
            });
        }
        if set.is_empty() {
            debug!(table = T::NAME, "Nothing to update");
            return Ok(0);
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            T::NAME,
            assignments(set, ", "),
            assignments(filter, " AND ")
        );
        let params: Vec<Value> = values(set).chain(values(filter)).collect();

        self.begin_if_needed().await?;
        let affected = self.run(&sql, &params).await?.rows_affected();

        info!(table = T::NAME, affected, "Updated rows (uncommitted)");
        Ok(affected)
    }

    /// Deletes matching rows. Staged until commit/close.
    ///
    /// ```text
    /// DELETE FROM <table> WHERE a = ? AND b = ?
    /// ```
    pub async fn delete<T: Table>(&mut self, filter: &[(T::Column, Value)]) -> DbResult<u64> {
        self.connection()?;

        if filter.is_empty() {
            return Err(DbError::EmptyFilter {
                operation: "delete",
                table: T::NAME,
            });
        }

        let sql = format!(
            "DELETE FROM {} WHERE {}",
            T::NAME,
            assignments(filter, " AND ")
        );
        let params: Vec<Value> = values(filter).collect();

        self.begin_if_needed().await?;
        let affected = self.run(&sql, &params).await?.rows_affected();

        info!(table = T::NAME, affected, "Deleted rows (uncommitted)");
        Ok(affected)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn connection(&mut self) -> DbResult<&mut SqliteConnection> {
        self.connection.as_mut().ok_or(DbError::NotConnected)
    }

    async fn run(&mut self, sql: &str, params: &[Value]) -> DbResult<SqliteQueryResult> {
        let connection = self.connection()?;

        debug!(sql, ?params, "Executing statement");
        bind_all(sqlx::query(sql), params)
            .execute(&mut *connection)
            .await
            .map_err(|e| {
                error!(sql, ?params, error = %e, "Statement failed");
                DbError::from(e)
            })
    }
}

/// Binds every value, in order, as a positional parameter.
fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(v) => query.bind(*v),
            Value::Real(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.as_str()),
            Value::Blob(v) => query.bind(v.as_slice()),
        };
    }
    query
}

fn decode_row(row: &SqliteRow) -> DbResult<Row> {
    (0..row.len()).map(|index| decode_value(row, index)).collect()
}

/// Decodes by the value's own storage class, not the declared column type.
fn decode_value(row: &SqliteRow, index: usize) -> DbResult<Value> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let kind = raw.type_info().name().to_string();

    let value = match kind.as_str() {
        "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get(index)?),
        "REAL" | "NUMERIC" => Value::Real(row.try_get(index)?),
        "BLOB" => Value::Blob(row.try_get(index)?),
        _ => Value::Text(row.try_get(index)?),
    };
    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Copy)]
    enum WidgetColumn {
        Id,
        Name,
        Colour,
        Weight,
    }

    impl Column for WidgetColumn {
        fn name(&self) -> &'static str {
            match self {
                WidgetColumn::Id => "id",
                WidgetColumn::Name => "name",
                WidgetColumn::Colour => "colour",
                WidgetColumn::Weight => "weight",
            }
        }
    }

    struct Widgets;

    impl Table for Widgets {
        const NAME: &'static str = "widgets";
        type Column = WidgetColumn;
    }

    const CREATE_WIDGETS: &str = "CREATE TABLE IF NOT EXISTS widgets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        colour TEXT,
        weight REAL
    )";

    fn widget(name: &str, colour: &str, weight: f64) -> Vec<(WidgetColumn, Value)> {
        vec![
            (WidgetColumn::Name, name.into()),
            (WidgetColumn::Colour, colour.into()),
            (WidgetColumn::Weight, weight.into()),
        ]
    }

    fn config(dir: &TempDir) -> DbConfig {
        DbConfig::new(dir.path().join("widgets.db"))
    }

    async fn open_widgets(dir: &TempDir) -> Database {
        let mut db = Database::new(config(dir));
        db.open().await.unwrap();
        db.execute(CREATE_WIDGETS, &[]).await.unwrap();
        db
    }

    async fn names(db: &mut Database) -> Vec<String> {
        db.query("SELECT name FROM widgets ORDER BY id", &[])
            .await
            .unwrap()
            .into_iter()
            .map(|row| row[0].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_open_twice_keeps_one_connection() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;

        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();
        db.open().await.unwrap();

        assert!(db.is_open());
        assert_eq!(names(&mut db).await, vec!["bolt"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_twice_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;

        db.close().await.unwrap();
        db.close().await.unwrap();
        assert!(!db.is_open());

        // and the handle can be reopened
        db.open().await.unwrap();
        assert!(db.is_open());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_statements_require_open_connection() {
        let dir = TempDir::new().unwrap();
        let mut db = Database::new(config(&dir));

        assert!(matches!(
            db.search::<Widgets>(&[]).await,
            Err(DbError::NotConnected)
        ));
        assert!(matches!(
            db.insert::<Widgets>(&widget("nut", "red", 0.1)).await,
            Err(DbError::NotConnected)
        ));
        assert!(matches!(
            db.delete::<Widgets>(&[(WidgetColumn::Id, 1.into())]).await,
            Err(DbError::NotConnected)
        ));

        // commit/rollback on a closed handle are reported no-ops
        db.commit().await.unwrap();
        db.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_open_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let mut db = Database::new(DbConfig::new(dir.path().join("missing/dir/x.db")));

        assert!(matches!(db.open().await, Err(DbError::ConnectionFailed(_))));
        assert!(!db.is_open());
    }

    #[tokio::test]
    async fn test_search_with_and_without_filter() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;

        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();
        db.insert::<Widgets>(&widget("nut", "grey", 0.5)).await.unwrap();
        db.insert::<Widgets>(&widget("gear", "gold", 3.0)).await.unwrap();

        let all = db.search::<Widgets>(&[]).await.unwrap();
        assert_eq!(all.len(), 3);

        let grey = db
            .search::<Widgets>(&[(WidgetColumn::Colour, "grey".into())])
            .await
            .unwrap();
        assert_eq!(grey.len(), 2);
        assert!(grey.iter().all(|row| row[2] == Value::Text("grey".into())));

        let grey_nut = db
            .search::<Widgets>(&[
                (WidgetColumn::Colour, "grey".into()),
                (WidgetColumn::Name, "nut".into()),
            ])
            .await
            .unwrap();
        assert_eq!(
            grey_nut,
            vec![vec![
                Value::Integer(2),
                Value::Text("nut".into()),
                Value::Text("grey".into()),
                Value::Real(0.5),
            ]]
        );

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_returns_rowid_and_binds_values_literally() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;

        let hostile = "x'); DROP TABLE widgets; --";
        let id = db.insert::<Widgets>(&widget(hostile, "red", 2.0)).await.unwrap();
        assert_eq!(id, 1);

        let rows = db
            .search::<Widgets>(&[(WidgetColumn::Name, hostile.into())])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], Value::Integer(1));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_unique_violation_keeps_first_row() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;

        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();
        let err = db
            .insert::<Widgets>(&widget("bolt", "blue", 9.0))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "widgets.name"));
        assert_eq!(names(&mut db).await, vec!["bolt"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_query_with_params_and_nulls() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;

        db.insert::<Widgets>(&[
            (WidgetColumn::Name, "spring".into()),
            (WidgetColumn::Colour, Value::Null),
        ])
        .await
        .unwrap();
        db.insert::<Widgets>(&widget("gear", "gold", 3.0)).await.unwrap();

        let heavy = db
            .query("SELECT COUNT(*) FROM widgets WHERE weight > ?", &[1.0.into()])
            .await
            .unwrap();
        assert_eq!(heavy, vec![vec![Value::Integer(1)]]);

        let spring = db
            .query("SELECT colour, weight FROM widgets WHERE name = ?", &["spring".into()])
            .await
            .unwrap();
        assert_eq!(spring, vec![vec![Value::Null, Value::Null]]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_binds_set_then_filter_and_waits_for_commit() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;
        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();
        db.insert::<Widgets>(&widget("nut", "grey", 0.5)).await.unwrap();

        let affected = db
            .update::<Widgets>(
                &[(WidgetColumn::Colour, "black".into()), (WidgetColumn::Weight, 2.0.into())],
                &[(WidgetColumn::Name, "bolt".into())],
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);
        assert!(db.has_pending_transaction());

        // a second reader still sees the committed state
        let mut reader = Database::new(config(&dir));
        reader.open().await.unwrap();
        let before = reader
            .search::<Widgets>(&[(WidgetColumn::Colour, "black".into())])
            .await
            .unwrap();
        assert!(before.is_empty());

        db.commit().await.unwrap();
        assert!(!db.has_pending_transaction());

        let after = reader
            .search::<Widgets>(&[(WidgetColumn::Colour, "black".into())])
            .await
            .unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0][1], Value::Text("bolt".into()));
        assert_eq!(after[0][3], Value::Real(2.0));

        reader.close().await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_rollback_discards_staged_delete() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;
        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();

        let affected = db
            .delete::<Widgets>(&[(WidgetColumn::Name, "bolt".into())])
            .await
            .unwrap();
        assert_eq!(affected, 1);

        db.rollback().await.unwrap();
        assert_eq!(names(&mut db).await, vec!["bolt"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_binds_values_and_close_commits() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;
        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();
        db.insert::<Widgets>(&widget("nut", "grey", 0.5)).await.unwrap();

        db.delete::<Widgets>(&[
            (WidgetColumn::Colour, "grey".into()),
            (WidgetColumn::Name, "nut".into()),
        ])
        .await
        .unwrap();
        db.close().await.unwrap();

        db.open().await.unwrap();
        assert_eq!(names(&mut db).await, vec!["bolt"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_flushes_staged_work() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;
        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();

        db.update::<Widgets>(
            &[(WidgetColumn::Colour, "white".into())],
            &[(WidgetColumn::Name, "bolt".into())],
        )
        .await
        .unwrap();
        db.insert::<Widgets>(&widget("nut", "grey", 0.5)).await.unwrap();

        assert!(!db.has_pending_transaction());
        db.rollback().await.unwrap();

        let white = db
            .search::<Widgets>(&[(WidgetColumn::Colour, "white".into())])
            .await
            .unwrap();
        assert_eq!(white.len(), 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_filter_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;
        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();

        assert!(matches!(
            db.delete::<Widgets>(&[]).await,
            Err(DbError::EmptyFilter { operation: "delete", table: "widgets" })
        ));
        assert!(matches!(
            db.update::<Widgets>(&[(WidgetColumn::Colour, "red".into())], &[]).await,
            Err(DbError::EmptyFilter { operation: "update", .. })
        ));
        assert_eq!(names(&mut db).await, vec!["bolt"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_scope_closes_after_success() {
        let dir = TempDir::new().unwrap();
        let mut db = Database::new(config(&dir));

        let count = db
            .scope(|db| {
                Box::pin(async move {
                    db.execute(CREATE_WIDGETS, &[]).await?;
                    db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await?;
                    Ok(db.search::<Widgets>(&[]).await?.len())
                })
            })
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert!(!db.is_open());
    }

    #[tokio::test]
    async fn test_scope_closes_and_commits_after_error() {
        let dir = TempDir::new().unwrap();
        let mut db = open_widgets(&dir).await;
        db.insert::<Widgets>(&widget("bolt", "grey", 1.5)).await.unwrap();
        db.close().await.unwrap();

        let result: DbResult<()> = db
            .scope(|db| {
                Box::pin(async move {
                    db.update::<Widgets>(
                        &[(WidgetColumn::Colour, "blue".into())],
                        &[(WidgetColumn::Name, "bolt".into())],
                    )
                    .await?;
                    Err(DbError::Internal("operator aborted".to_string()))
                })
            })
            .await;

        assert!(matches!(result, Err(DbError::Internal(msg)) if msg == "operator aborted"));
        assert!(!db.is_open());

        let blue = Database::scoped(config(&dir), |db| {
            Box::pin(async move {
                db.search::<Widgets>(&[(WidgetColumn::Colour, "blue".into())])
                    .await
            })
        })
        .await
        .unwrap();
        assert_eq!(blue.len(), 1);
    }

    #[tokio::test]
    async fn test_scope_reports_open_failure() {
        let dir = TempDir::new().unwrap();
        let result: DbResult<()> = Database::scoped(
            DbConfig::new(dir.path().join("nope/x.db")),
            |_db| Box::pin(async move { Ok(()) }),
        )
        .await;

        assert!(matches!(result, Err(DbError::ConnectionFailed(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/masa.db")
            .journal_mode(SqliteJournalMode::Delete)
            .foreign_keys(false)
            .busy_timeout(Duration::from_millis(250));

        assert_eq!(config.database_path, PathBuf::from("/tmp/masa.db"));
        assert!(matches!(config.journal_mode, SqliteJournalMode::Delete));
        assert!(!config.foreign_keys);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }
}
