//! # ObserverSet: panic-isolated fan-out over observers
//!
//! ## What it guarantees
//! - Observers are called in registration order.
//! - Panics inside observers are caught and logged (isolation).

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::events::HubEvent;

use super::Observe;

/// Ordered list of observers.
#[derive(Clone, Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn Observe>>,
}

impl ObserverSet {
    /// Creates a set from the given observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>) -> Self {
        Self { observers }
    }

    /// Adds one observer at the end.
    pub fn push(&mut self, observer: Arc<dyn Observe>) {
        self.observers.push(observer);
    }

    /// Delivers `event` to every observer.
    pub fn emit(&self, event: &HubEvent) {
        for obs in &self.observers {
            let result = panic::catch_unwind(AssertUnwindSafe(|| obs.on_event(event)));
            if let Err(panic_err) = result {
                let info = panic_err
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic_err.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(observer = obs.name(), info = %info, "observer panicked");
            }
        }
    }

    /// True if there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }
}
