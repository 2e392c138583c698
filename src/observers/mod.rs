//! # Hub observers.
//!
//! This module provides the [`Observe`] trait and the [`ObserverSet`] the hub
//! uses to fan out [`HubEvent`](crate::HubEvent)s.
//!
//! ```text
//!   BarrierHub ── HubEvent ──► ObserverSet ──► Observe::on_event(&HubEvent)
//!                                                  │
//!                                        ┌─────────┼─────────┐
//!                                        ▼         ▼         ▼
//!                                    LogWriter  Metrics   Custom
//! ```

#[cfg(feature = "logging")]
mod log;
mod observe;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observe::Observe;
pub use set::ObserverSet;
