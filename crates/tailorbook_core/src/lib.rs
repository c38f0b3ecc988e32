//! Records core for a tailoring shop: customers, measurements and delivery
//! logs over a local transactional store.
//! This crate is the single source of truth for record invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{StoreConfig, StoreLocation};
pub use id::{IdGenerator, RandomIdGenerator, CUSTOMER_ID_PREFIX, DELIVERY_LOG_ID_PREFIX};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    Customer, CustomerId, DeliveryLog, DeliveryLogId, DeliveryMode, DeliveryStatus, DressType,
    Measurements, NewCustomer, NewDeliveryLog, ValidationError,
};
pub use repo::{
    Collection, CollectionTx, RecordStore, StoreError, StoreResult, StoredRecord,
    TransactionFailure, TxMode,
};
pub use service::{RecordsError, RecordsResult, RecordsService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
