//! Resource-changed notifications.
//!
//! Every successful ledger/inventory mutation fans out synchronously to the
//! registered observers (UI panels, telemetry) within the same tick. A
//! misbehaving observer must not undo the mutation that triggered it, so
//! each dispatch is isolated: a panic is caught, logged, and the remaining
//! observers still run.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::state::OwnerId;

/// Subscriber interface for resource-change events.
pub trait ResourceObserver: Send + Sync {
    /// Called after the holdings of `owner` changed on the authoritative
    /// side. The new totals are read back through the game state.
    fn resources_changed(&self, owner: OwnerId);
}

/// Fan-out point for resource-change notifications.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn ResourceObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ResourceObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notifies every observer, isolating failures per subscriber.
    pub fn notify(&self, owner: OwnerId) {
        for observer in &self.observers {
            let result = catch_unwind(AssertUnwindSafe(|| observer.resources_changed(owner)));
            if result.is_err() {
                tracing::warn!(%owner, "resource observer panicked during notification");
            }
        }
    }
}

impl core::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
