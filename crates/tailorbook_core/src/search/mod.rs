//! In-memory filters over fully loaded collections.
//!
//! # Invariants
//! - Matching is case-insensitive substring containment.
//! - Input order is preserved; an empty query keeps everything.

pub mod filter;

pub use filter::{filter_customers, filter_delivery_logs};
