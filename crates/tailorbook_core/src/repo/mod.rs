//! Record store: durable, transactional storage of the three collections.
//!
//! # Responsibility
//! - Map each record type onto its SQLite table.
//! - Scope every read and write to one transaction on one collection.
//!
//! # Invariants
//! - Only `service` enforces cross-collection rules; tables carry no foreign
//!   keys between collections.

mod customer_repo;
mod delivery_log_repo;
mod measurements_repo;
pub mod store;

pub use store::{
    Collection, CollectionTx, RecordStore, StoreError, StoreResult, StoredRecord,
    TransactionFailure, TxMode,
};
