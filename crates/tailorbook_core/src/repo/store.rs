//! Transactional record store over SQLite.
//!
//! # Responsibility
//! - Own the connection lifecycle for file and in-memory locations.
//! - Run one operation against one collection inside a scoped transaction.
//! - Provide the per-collection primitives `get`, `get_all`, `put`, `add`
//!   and `delete`.
//!
//! # Invariants
//! - A transaction commits only when its operation returns `Ok`; any error
//!   rolls it back, so partial writes are never visible.
//! - File locations open a fresh connection per transaction and close it
//!   afterwards. Callers must not assume connection reuse.
//! - Write primitives fail inside a `ReadOnly` transaction.

use crate::config::{StoreConfig, StoreLocation};
use crate::db::{open_db, open_db_in_memory, DbError};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub type StoreResult<T> = Result<T, StoreError>;

/// The three independently keyed record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Customers,
    Measurements,
    DeliveryLogs,
}

impl Collection {
    /// External collection name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Measurements => "measurements",
            Self::DeliveryLogs => "deliveryLogs",
        }
    }

    fn table(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Measurements => "measurements",
            Self::DeliveryLogs => "delivery_logs",
        }
    }

    fn key_column(self) -> &'static str {
        match self {
            Self::Customers | Self::DeliveryLogs => "id",
            Self::Measurements => "customer_id",
        }
    }

    /// Natural index order used by `get_all`: newest first, key as tie-break.
    fn natural_order(self) -> &'static str {
        match self {
            Self::Customers => "updated_at DESC, id ASC",
            Self::Measurements => "updated_at DESC, customer_id ASC",
            Self::DeliveryLogs => "created_at DESC, id ASC",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Transaction access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

impl TxMode {
    fn label(self) -> &'static str {
        match self {
            Self::ReadOnly => "readonly",
            Self::ReadWrite => "readwrite",
        }
    }
}

/// Cause of an aborted transaction.
#[derive(Debug)]
pub enum TransactionFailure {
    Sqlite(rusqlite::Error),
    /// A write primitive was called inside a `ReadOnly` transaction.
    ReadOnly(Collection),
    /// A persisted row could not be decoded into its record type.
    InvalidData(String),
}

impl Display for TransactionFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ReadOnly(collection) => {
                write!(f, "write attempted in read-only transaction on `{collection}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
        }
    }
}

impl Error for TransactionFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ReadOnly(_) | Self::InvalidData(_) => None,
        }
    }
}

/// Record store error.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying database cannot be opened or migrated.
    StorageUnavailable(DbError),
    /// `add` hit an existing primary key. The transaction was aborted.
    DuplicateKey { collection: Collection, key: String },
    /// The transaction was aborted; state is unchanged.
    TransactionFailed(TransactionFailure),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "record store unavailable: {err}"),
            Self::DuplicateKey { collection, key } => {
                write!(f, "duplicate key `{key}` in `{collection}`")
            }
            Self::TransactionFailed(err) => write!(f, "transaction failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::DuplicateKey { .. } => None,
            Self::TransactionFailed(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::TransactionFailed(TransactionFailure::Sqlite(value))
    }
}

impl From<TransactionFailure> for StoreError {
    fn from(value: TransactionFailure) -> Self {
        Self::TransactionFailed(value)
    }
}

/// A record type persisted in exactly one collection.
///
/// `COLUMNS[0]` is the primary key column; [`StoredRecord::to_values`]
/// returns one value per column in the same order.
pub trait StoredRecord: Sized {
    const COLLECTION: Collection;
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> &str;
    fn to_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> StoreResult<Self>;
}

/// Collection handle valid for the lifetime of one transaction.
pub struct CollectionTx<'tx, R> {
    conn: &'tx Connection,
    mode: TxMode,
    _record: PhantomData<fn() -> R>,
}

impl<R: StoredRecord> CollectionTx<'_, R> {
    /// Point read by primary key.
    pub fn get(&self, key: &str) -> StoreResult<Option<R>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1;",
            R::COLUMNS.join(", "),
            R::COLLECTION.table(),
            R::COLLECTION.key_column()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([key])?;
        let record = match rows.next()? {
            Some(row) => Some(R::from_row(row)?),
            None => None,
        };
        Ok(record)
    }

    /// Every record in natural index order.
    pub fn get_all(&self) -> StoreResult<Vec<R>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {};",
            R::COLUMNS.join(", "),
            R::COLLECTION.table(),
            R::COLLECTION.natural_order()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }
        Ok(records)
    }

    /// Insert-or-replace by primary key.
    pub fn put(&self, record: &R) -> StoreResult<()> {
        self.ensure_writable()?;
        let key_column = R::COLLECTION.key_column();
        let assignments = R::COLUMNS
            .iter()
            .filter(|column| **column != key_column)
            .map(|column| format!("{column} = excluded.{column}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "{} ON CONFLICT ({key_column}) DO UPDATE SET {assignments};",
            insert_sql::<R>()
        );
        self.conn.execute(&sql, params_from_iter(record.to_values()))?;
        Ok(())
    }

    /// Insert only; an existing key fails with [`StoreError::DuplicateKey`].
    pub fn add(&self, record: &R) -> StoreResult<()> {
        self.ensure_writable()?;
        if self.contains(record.key())? {
            return Err(StoreError::DuplicateKey {
                collection: R::COLLECTION,
                key: record.key().to_string(),
            });
        }
        self.conn.execute(
            &format!("{};", insert_sql::<R>()),
            params_from_iter(record.to_values()),
        )?;
        Ok(())
    }

    /// Removes a record. Returns whether one existed; absence is not an error.
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        self.ensure_writable()?;
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                R::COLLECTION.table(),
                R::COLLECTION.key_column()
            ),
            [key],
        )?;
        Ok(changed > 0)
    }

    pub fn contains(&self, key: &str) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                &format!(
                    "SELECT 1 FROM {} WHERE {} = ?1;",
                    R::COLLECTION.table(),
                    R::COLLECTION.key_column()
                ),
                [key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        match self.mode {
            TxMode::ReadWrite => Ok(()),
            TxMode::ReadOnly => Err(TransactionFailure::ReadOnly(R::COLLECTION).into()),
        }
    }
}

fn insert_sql<R: StoredRecord>() -> String {
    let placeholders = (1..=R::COLUMNS.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        R::COLLECTION.table(),
        R::COLUMNS.join(", ")
    )
}

enum Backend {
    File(PathBuf),
    Memory(Mutex<Connection>),
}

/// Durable store of the customers, measurements and delivery log collections.
pub struct RecordStore {
    backend: Backend,
    busy_timeout: Duration,
}

impl RecordStore {
    /// Opens the configured location and ensures the schema is current.
    ///
    /// # Errors
    /// - [`StoreError::StorageUnavailable`] when the database cannot be
    ///   opened or carries a schema newer than this build.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let busy_timeout = config.busy_timeout();
        let backend = match &config.location {
            StoreLocation::File(path) => {
                // Fail fast on an unusable file; the connection is not kept.
                let conn =
                    open_db(path, busy_timeout).map_err(StoreError::StorageUnavailable)?;
                close_connection(conn);
                Backend::File(path.clone())
            }
            StoreLocation::Memory => Backend::Memory(Mutex::new(
                open_db_in_memory(busy_timeout).map_err(StoreError::StorageUnavailable)?,
            )),
        };
        Ok(Self {
            backend,
            busy_timeout,
        })
    }

    pub fn open_file(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(&StoreConfig::file(path))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Runs `op` against `R`'s collection inside one scoped transaction.
    ///
    /// Commits when `op` returns `Ok`; rolls back on any error, which is
    /// returned unchanged.
    pub fn run_in_transaction<R, T>(
        &self,
        mode: TxMode,
        op: impl FnOnce(&CollectionTx<'_, R>) -> StoreResult<T>,
    ) -> StoreResult<T>
    where
        R: StoredRecord,
    {
        match &self.backend {
            Backend::File(path) => {
                let mut conn =
                    open_db(path, self.busy_timeout).map_err(StoreError::StorageUnavailable)?;
                let result = execute_in_transaction(&mut conn, R::COLLECTION, mode, op);
                close_connection(conn);
                result
            }
            Backend::Memory(conn) => {
                let mut guard = conn
                    .lock()
                    .map_err(|_| StoreError::StorageUnavailable(DbError::ConnectionPoisoned))?;
                execute_in_transaction(&mut guard, R::COLLECTION, mode, op)
            }
        }
    }
}

fn execute_in_transaction<R, T>(
    conn: &mut Connection,
    collection: Collection,
    mode: TxMode,
    op: impl FnOnce(&CollectionTx<'_, R>) -> StoreResult<T>,
) -> StoreResult<T>
where
    R: StoredRecord,
{
    let started_at = Instant::now();
    let behavior = match mode {
        TxMode::ReadOnly => TransactionBehavior::Deferred,
        TxMode::ReadWrite => TransactionBehavior::Immediate,
    };
    let tx = conn.transaction_with_behavior(behavior)?;

    let outcome = op(&CollectionTx {
        conn: &tx,
        mode,
        _record: PhantomData,
    });

    match outcome {
        Ok(value) => {
            tx.commit()?;
            debug!(
                "event=store_tx module=store status=ok collection={collection} mode={} duration_ms={}",
                mode.label(),
                started_at.elapsed().as_millis()
            );
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(
                    "event=store_tx module=store status=error collection={collection} error_code=rollback_failed error={rollback_err}"
                );
            }
            debug!(
                "event=store_tx module=store status=aborted collection={collection} mode={} duration_ms={} error={err}",
                mode.label(),
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn close_connection(conn: Connection) {
    if let Err((_, err)) = conn.close() {
        warn!("event=db_close module=store status=error error={err}");
    }
}
