//! Data-access use-cases.
//!
//! # Responsibility
//! - Expose one operation per business action on customers, measurements
//!   and delivery logs.
//! - Own validation, timestamp/ID defaulting and the customer cascade.
//!
//! # Invariants
//! - UI/host layers go through [`RecordsService`]; they never need to open
//!   store transactions themselves.

mod customer_service;
mod delivery_service;
mod measurements_service;
pub mod records_service;

pub use records_service::{RecordsError, RecordsResult, RecordsService};
