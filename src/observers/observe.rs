//! # Core observer trait
//!
//! `Observe` is the extension point for watching hub bookkeeping (buffering,
//! barrier opening, resets). Observers are called synchronously on the thread
//! that caused the event, after the hub released its internal lock.
//!
//! ## Contract
//! - Keep `on_event` cheap: it runs inline with `send`/`reset`.
//! - A panicking observer is isolated: the panic is caught and logged, delivery
//!   to channels and other observers continues.
//!
//! ## Example (skeleton)
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use synchro::{HubEvent, HubEventKind, Observe};
//!
//! #[derive(Default)]
//! struct OpenCounter(AtomicU64);
//!
//! impl Observe for OpenCounter {
//!     fn on_event(&self, event: &HubEvent) {
//!         if event.kind == HubEventKind::BarrierOpened {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!     fn name(&self) -> &'static str { "open-counter" }
//! }
//! ```

use crate::events::HubEvent;

/// Contract for hub observers.
pub trait Observe: Send + Sync + 'static {
    /// Handle a single hub event.
    fn on_event(&self, event: &HubEvent);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
