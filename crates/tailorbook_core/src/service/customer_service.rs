//! Customer use-cases.
//!
//! # Invariants
//! - `created_at` is assigned once on add and never taken from callers.
//! - `updated_at` is stamped on every write and never precedes `created_at`.
//! - Deleting a customer removes its measurements best-effort in a second
//!   transaction; delivery logs are kept.

use crate::clock::Clock;
use crate::id::{IdGenerator, CUSTOMER_ID_PREFIX};
use crate::model::validation::normalize_optional;
use crate::model::{Customer, CustomerId, Measurements, NewCustomer};
use crate::repo::TxMode;
use crate::search::filter_customers;
use crate::service::records_service::{RecordsResult, RecordsService};
use log::{info, warn};

impl<C: Clock, G: IdGenerator> RecordsService<C, G> {
    /// Creates a customer, generating its ID when none is supplied.
    ///
    /// # Errors
    /// - `Validation` when `name` or `location` is blank or `email` is malformed.
    /// - `DuplicateKey` when the ID is already taken.
    pub fn add_customer(&self, new: NewCustomer) -> RecordsResult<Customer> {
        let now = self.clock.now_ms();
        let customer = Customer {
            id: self.key_or_generate(new.id, CUSTOMER_ID_PREFIX),
            name: new.name,
            location: new.location,
            phone: normalize_optional(new.phone),
            email: normalize_optional(new.email),
            created_at: now,
            updated_at: now,
        };
        customer.validate()?;

        self.store
            .run_in_transaction::<Customer, _>(TxMode::ReadWrite, |tx| tx.add(&customer))?;
        info!(
            "event=customer_add module=service status=ok customer_id={}",
            customer.id
        );
        Ok(customer)
    }

    /// Saves edits to a customer and returns the stored record.
    ///
    /// `created_at` is read back from storage inside the same transaction;
    /// an unknown ID is inserted with `created_at = now`.
    pub fn update_customer(&self, customer: &Customer) -> RecordsResult<Customer> {
        let now = self.clock.now_ms();
        let mut record = Customer {
            phone: normalize_optional(customer.phone.clone()),
            email: normalize_optional(customer.email.clone()),
            ..customer.clone()
        };
        record.validate()?;

        self.store
            .run_in_transaction::<Customer, _>(TxMode::ReadWrite, |tx| {
                record.created_at = tx.get(&record.id)?.map_or(now, |stored| stored.created_at);
                record.updated_at = now.max(record.created_at);
                tx.put(&record)?;
                Ok(record)
            })
            .map_err(Into::into)
    }

    pub fn get_customer(&self, id: &str) -> RecordsResult<Option<Customer>> {
        Ok(self
            .store
            .run_in_transaction::<Customer, _>(TxMode::ReadOnly, |tx| tx.get(id))?)
    }

    /// All customers, most recently updated first.
    pub fn get_all_customers(&self) -> RecordsResult<Vec<Customer>> {
        Ok(self
            .store
            .run_in_transaction::<Customer, _>(TxMode::ReadOnly, |tx| tx.get_all())?)
    }

    /// Deletes a customer, then its measurements.
    ///
    /// The second step is best-effort: its failure is logged and does not
    /// undo the first. A crash in between leaves an orphaned measurements
    /// record, which a later `delete_measurements` can remove.
    pub fn delete_customer(&self, id: &str) -> RecordsResult<()> {
        self.store
            .run_in_transaction::<Customer, _>(TxMode::ReadWrite, |tx| tx.delete(id))?;

        match self
            .store
            .run_in_transaction::<Measurements, _>(TxMode::ReadWrite, |tx| tx.delete(id))
        {
            Ok(removed) => info!(
                "event=customer_delete module=service status=ok customer_id={id} measurements_removed={removed}"
            ),
            Err(err) => warn!(
                "event=customer_delete_cascade module=service status=error customer_id={id} error={err}"
            ),
        }
        Ok(())
    }

    /// Customers whose `id`, `name` or `location` contains `query`,
    /// ignoring case, in [`get_all_customers`](Self::get_all_customers) order.
    pub fn search_customers(&self, query: &str) -> RecordsResult<Vec<Customer>> {
        Ok(filter_customers(self.get_all_customers()?, query))
    }

    /// Looks up customer names by ID for list rendering.
    pub(crate) fn customer_names(&self) -> RecordsResult<Vec<(CustomerId, String)>> {
        Ok(self
            .get_all_customers()?
            .into_iter()
            .map(|customer| (customer.id, customer.name))
            .collect())
    }
}
