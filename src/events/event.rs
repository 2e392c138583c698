//! # Diagnostic events emitted by a barrier hub.
//!
//! [`HubEventKind`] classifies what happened inside the hub; [`HubEvent`]
//! carries the metadata (sequence number, timestamp, hub name, type, group).
//! These events describe hub bookkeeping only; the user values themselves are
//! delivered through channels, never through events.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use synchro::{Group, HubEvent, HubEventKind};
//!
//! let ev = HubEvent::new(HubEventKind::Buffered)
//!     .with_hub("telemetry")
//!     .with_type("my::Position")
//!     .with_group(Group::Required);
//!
//! assert_eq!(ev.kind, HubEventKind::Buffered);
//! assert_eq!(ev.hub.as_deref(), Some("telemetry"));
//! assert_eq!(ev.group, Some(Group::Required));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::registry::Group;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of hub events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubEventKind {
    /// A value was stored in pending storage while the barrier was closed.
    ///
    /// Sets:
    /// - `type_name`, `group`
    /// - `count`: required slots filled after this send
    Buffered,

    /// The last missing required type arrived; pending values were flushed.
    ///
    /// Sets:
    /// - `type_name`: the triggering type
    /// - `group`: always `Required`
    /// - `count`: number of values published by the flush (trigger included)
    BarrierOpened,

    /// Pending storage emptied and state returned to accumulating.
    Reset,

    /// Reset plus every channel subscription revoked.
    Cleared,

    /// A send or subscribe named a type outside the registry.
    ///
    /// Sets:
    /// - `type_name`
    UnknownType,

    /// An asynchronous producer fell behind and skipped values.
    ///
    /// Sets:
    /// - `type_name`
    /// - `count`: number of skipped values
    ProducerLagged,
}

impl HubEventKind {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            HubEventKind::Buffered => "buffered",
            HubEventKind::BarrierOpened => "barrier_opened",
            HubEventKind::Reset => "reset",
            HubEventKind::Cleared => "cleared",
            HubEventKind::UnknownType => "unknown_type",
            HubEventKind::ProducerLagged => "producer_lagged",
        }
    }
}

/// Hub event with optional metadata.
#[derive(Clone, Debug)]
pub struct HubEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: HubEventKind,
    /// Name of the emitting hub.
    pub hub: Option<Arc<str>>,
    /// Value type concerned, if any.
    pub type_name: Option<&'static str>,
    /// Group of that type, if registered.
    pub group: Option<Group>,
    /// Kind-specific counter (see [`HubEventKind`]).
    pub count: Option<u64>,
}

impl HubEvent {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: HubEventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            hub: None,
            type_name: None,
            group: None,
            count: None,
        }
    }

    /// Attaches the hub name.
    #[inline]
    pub fn with_hub(mut self, hub: impl Into<Arc<str>>) -> Self {
        self.hub = Some(hub.into());
        self
    }

    /// Attaches the value type name.
    #[inline]
    pub fn with_type(mut self, type_name: &'static str) -> Self {
        self.type_name = Some(type_name);
        self
    }

    /// Attaches the group.
    #[inline]
    pub fn with_group(mut self, group: Group) -> Self {
        self.group = Some(group);
        self
    }

    /// Attaches a counter.
    #[inline]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}
