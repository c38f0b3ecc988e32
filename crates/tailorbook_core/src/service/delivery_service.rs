//! Delivery log use-cases.
//!
//! # Invariants
//! - `delivery_date` is set exactly while `status == Delivered`.
//! - `created_at` survives updates; `updated_at` is stamped on every write.
//! - Logs reference customers loosely and outlive them.

use crate::clock::Clock;
use crate::id::{IdGenerator, DELIVERY_LOG_ID_PREFIX};
use crate::model::validation::normalize_optional;
use crate::model::{DeliveryLog, NewDeliveryLog};
use crate::repo::TxMode;
use crate::search::filter_delivery_logs;
use crate::service::records_service::{RecordsResult, RecordsService};
use log::info;
use std::collections::HashMap;

impl<C: Clock, G: IdGenerator> RecordsService<C, G> {
    /// Records garments taken in (or already delivered).
    ///
    /// `taken_date` defaults to now; a `Delivered` log without a date is
    /// stamped with now.
    ///
    /// # Errors
    /// - `Validation` for a blank customer, zero quantity, or mode `Other`
    ///   without a recipient.
    /// - `DuplicateKey` when the supplied ID is taken.
    pub fn add_delivery_log(&self, new: NewDeliveryLog) -> RecordsResult<DeliveryLog> {
        new.validate()?;
        let now = self.clock.now_ms();
        let mut log = DeliveryLog {
            id: self.key_or_generate(new.id, DELIVERY_LOG_ID_PREFIX),
            customer_id: new.customer_id,
            dress_type: new.dress_type,
            quantity: new.quantity,
            delivery_mode: new.delivery_mode,
            recipient_name: normalize_optional(new.recipient_name),
            status: new.status,
            taken_date: new.taken_date.unwrap_or(now),
            delivery_date: new.delivery_date,
            notes: normalize_optional(new.notes),
            created_at: now,
            updated_at: now,
        };
        log.normalize_delivery_date(None, now);
        log.validate()?;

        self.store
            .run_in_transaction::<DeliveryLog, _>(TxMode::ReadWrite, |tx| tx.add(&log))?;
        info!(
            "event=delivery_log_add module=service status=ok delivery_log_id={} customer_id={}",
            log.id, log.customer_id
        );
        Ok(log)
    }

    /// Saves edits to a delivery log and returns the stored record.
    ///
    /// Switching to `Delivered` keeps the caller's date, else the stored
    /// one, else stamps now. Switching to `Taken` clears the date.
    pub fn update_delivery_log(&self, log: &DeliveryLog) -> RecordsResult<DeliveryLog> {
        let now = self.clock.now_ms();
        let mut record = DeliveryLog {
            recipient_name: normalize_optional(log.recipient_name.clone()),
            notes: normalize_optional(log.notes.clone()),
            ..log.clone()
        };
        record.validate()?;

        self.store
            .run_in_transaction::<DeliveryLog, _>(TxMode::ReadWrite, |tx| {
                let stored = tx.get(&record.id)?;
                record.created_at = stored.as_ref().map_or(now, |existing| existing.created_at);
                record.updated_at = now.max(record.created_at);
                record.normalize_delivery_date(
                    stored.and_then(|existing| existing.delivery_date),
                    now,
                );
                tx.put(&record)?;
                Ok(record)
            })
            .map_err(Into::into)
    }

    pub fn get_delivery_log(&self, id: &str) -> RecordsResult<Option<DeliveryLog>> {
        Ok(self
            .store
            .run_in_transaction::<DeliveryLog, _>(TxMode::ReadOnly, |tx| tx.get(id))?)
    }

    /// All delivery logs, newest first by `created_at`.
    pub fn get_all_delivery_logs(&self) -> RecordsResult<Vec<DeliveryLog>> {
        Ok(self
            .store
            .run_in_transaction::<DeliveryLog, _>(TxMode::ReadOnly, |tx| tx.get_all())?)
    }

    /// Logs of one customer, in [`get_all_delivery_logs`](Self::get_all_delivery_logs)
    /// order.
    ///
    /// Loads every log and filters in memory; the `customer_id` index is not
    /// consulted.
    pub fn get_customer_delivery_logs(&self, customer_id: &str) -> RecordsResult<Vec<DeliveryLog>> {
        Ok(self
            .get_all_delivery_logs()?
            .into_iter()
            .filter(|log| log.customer_id == customer_id)
            .collect())
    }

    /// Removes a delivery log; absence is not an error.
    pub fn delete_delivery_log(&self, id: &str) -> RecordsResult<()> {
        self.store
            .run_in_transaction::<DeliveryLog, _>(TxMode::ReadWrite, |tx| tx.delete(id))?;
        Ok(())
    }

    /// Logs whose customer name, dress type or recipient contains `query`,
    /// ignoring case.
    pub fn search_delivery_logs(&self, query: &str) -> RecordsResult<Vec<DeliveryLog>> {
        let names = self.customer_names()?;
        let lookup: HashMap<&str, &str> = names
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .collect();
        Ok(filter_delivery_logs(
            self.get_all_delivery_logs()?,
            &lookup,
            query,
        ))
    }
}
