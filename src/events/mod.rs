//! Hub diagnostic events.
//!
//! ## Contents
//! - [`HubEventKind`], [`HubEvent`] classification and metadata
//!
//! Events are produced by [`BarrierHub`](crate::BarrierHub) and the async
//! producer pump, and consumed by [`Observe`](crate::Observe) implementations.

mod event;

pub use event::{HubEvent, HubEventKind};
