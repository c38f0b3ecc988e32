//! Record model for the tailoring shop.
//!
//! # Responsibility
//! - Define the three persisted record shapes and their creation inputs.
//! - Own field-level validation; cross-record rules live in `service`.
//!
//! # Invariants
//! - Records serialize with camelCase names (`createdAt`, `customerId`).
//! - Timestamps are epoch milliseconds.

pub mod customer;
pub mod delivery_log;
pub mod measurements;
pub mod validation;

pub use customer::{Customer, CustomerId, NewCustomer};
pub use delivery_log::{
    DeliveryLog, DeliveryLogId, DeliveryMode, DeliveryStatus, DressType, NewDeliveryLog,
};
pub use measurements::{Measurements, MEASUREMENT_FIELDS};
pub use validation::ValidationError;
