//! Measurements use-cases. Saving is always an upsert keyed by customer.

use crate::clock::Clock;
use crate::id::IdGenerator;
use crate::model::validation::normalize_optional;
use crate::model::Measurements;
use crate::repo::TxMode;
use crate::service::records_service::{RecordsResult, RecordsService};

impl<C: Clock, G: IdGenerator> RecordsService<C, G> {
    /// Creates or replaces the measurement sheet of `measurements.customer_id`.
    ///
    /// The owning customer is not looked up; sheets are only meaningful for
    /// existing customers and callers are expected to save them together.
    pub fn add_or_update_measurements(
        &self,
        measurements: &Measurements,
    ) -> RecordsResult<Measurements> {
        let sheet = Measurements {
            notes: normalize_optional(measurements.notes.clone()),
            updated_at: self.clock.now_ms(),
            ..measurements.clone()
        };
        sheet.validate()?;

        self.store
            .run_in_transaction::<Measurements, _>(TxMode::ReadWrite, |tx| tx.put(&sheet))?;
        Ok(sheet)
    }

    pub fn get_measurements(&self, customer_id: &str) -> RecordsResult<Option<Measurements>> {
        Ok(self
            .store
            .run_in_transaction::<Measurements, _>(TxMode::ReadOnly, |tx| tx.get(customer_id))?)
    }

    /// Removes a measurement sheet. Returns whether one existed.
    pub fn delete_measurements(&self, customer_id: &str) -> RecordsResult<bool> {
        Ok(self
            .store
            .run_in_transaction::<Measurements, _>(TxMode::ReadWrite, |tx| {
                tx.delete(customer_id)
            })?)
    }
}
