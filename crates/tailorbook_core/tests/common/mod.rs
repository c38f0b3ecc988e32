#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tailorbook_core::{IdGenerator, ManualClock, RecordStore, RecordsService};

pub const START_MS: i64 = 1_700_000_000_000;

/// Deterministic IDs: `CUS-1`, `DEL-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn generate_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }
}

pub type TestService = RecordsService<Arc<ManualClock>, SequentialIds>;

pub fn service_on(store: RecordStore) -> (TestService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START_MS));
    let service =
        RecordsService::with_collaborators(store, Arc::clone(&clock), SequentialIds::default());
    (service, clock)
}

pub fn service() -> (TestService, Arc<ManualClock>) {
    service_on(RecordStore::open_in_memory().unwrap())
}
