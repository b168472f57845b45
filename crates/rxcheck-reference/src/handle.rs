//! Hot-swappable reference snapshots.
//!
//! `ReferenceHandle` holds the current `ReferenceStore` behind an `Arc`.
//! Validations take a snapshot (an `Arc` clone) and keep it for the whole
//! request; `publish` swaps in a new store without touching snapshots already
//! handed out.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use rxcheck_contracts::reference::ReferenceStore;
use rxcheck_core::traits::ReferenceSource;

/// Shared, replaceable reference data.
pub struct ReferenceHandle {
    current: RwLock<Arc<ReferenceStore>>,
}

impl ReferenceHandle {
    pub fn new(store: ReferenceStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// Replace the current store. In-flight validations keep their snapshot.
    pub fn publish(&self, store: ReferenceStore) {
        let diagnoses = store.len();
        let drugs = store.vocabulary().len();
        let next = Arc::new(store);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => {
                warn!("reference handle lock poisoned; replacing store anyway");
                *poisoned.into_inner() = next;
            }
        }
        info!(diagnoses, drugs, "reference data published");
    }
}

impl ReferenceSource for ReferenceHandle {
    fn snapshot(&self) -> Arc<ReferenceStore> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}
