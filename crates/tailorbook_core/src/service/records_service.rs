//! Data-access façade shared by the customer, measurements and delivery log
//! use-cases.
//!
//! # Responsibility
//! - Hold the record store and the clock/ID collaborators.
//! - Translate store failures into the public [`RecordsError`] taxonomy.
//!
//! # Invariants
//! - Every operation is a function of its arguments; no selection or session
//!   state is kept between calls.
//! - Every read re-fetches from the store; nothing is cached.

use crate::clock::{Clock, SystemClock};
use crate::db::DbError;
use crate::id::{IdGenerator, RandomIdGenerator};
use crate::model::ValidationError;
use crate::repo::{Collection, RecordStore, StoreError, TransactionFailure};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RecordsResult<T> = Result<T, RecordsError>;

/// Failure of a data-access operation.
///
/// Operations are single-attempt: when an error is returned the caller must
/// assume the write did not happen.
#[derive(Debug)]
pub enum RecordsError {
    /// Missing or invalid field; correct the input and retry.
    Validation(ValidationError),
    /// Primary key already taken on add.
    DuplicateKey { collection: Collection, key: String },
    /// Store cannot be opened; fatal for the session.
    StorageUnavailable(DbError),
    /// Transaction aborted; stored state is unchanged.
    TransactionFailed(TransactionFailure),
}

impl Display for RecordsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey { collection, key } => {
                write!(f, "`{key}` already exists in `{collection}`")
            }
            Self::StorageUnavailable(err) => write!(f, "record store unavailable: {err}"),
            Self::TransactionFailed(err) => write!(f, "transaction failed: {err}"),
        }
    }
}

impl Error for RecordsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateKey { .. } => None,
            Self::StorageUnavailable(err) => Some(err),
            Self::TransactionFailed(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RecordsError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RecordsError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::StorageUnavailable(err) => Self::StorageUnavailable(err),
            StoreError::DuplicateKey { collection, key } => Self::DuplicateKey { collection, key },
            StoreError::TransactionFailed(err) => Self::TransactionFailed(err),
        }
    }
}

/// Typed entry point for every business action on shop records.
pub struct RecordsService<C: Clock = SystemClock, G: IdGenerator = RandomIdGenerator> {
    pub(crate) store: RecordStore,
    pub(crate) clock: C,
    pub(crate) ids: G,
}

impl RecordsService {
    /// Service on the system clock with random time-prefixed IDs.
    pub fn new(store: RecordStore) -> Self {
        Self::with_collaborators(store, SystemClock, RandomIdGenerator::new())
    }
}

impl<C: Clock, G: IdGenerator> RecordsService<C, G> {
    pub fn with_collaborators(store: RecordStore, clock: C, ids: G) -> Self {
        Self { store, clock, ids }
    }

    /// Underlying store, for hosts that need raw collection access.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Caller-supplied key when non-blank, otherwise a generated one.
    pub(crate) fn key_or_generate(&self, key: Option<String>, prefix: &str) -> String {
        match key.filter(|value| !value.trim().is_empty()) {
            Some(value) => value,
            None => self.ids.generate_id(prefix),
        }
    }
}
