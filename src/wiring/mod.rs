//! Producer wiring: forwarding typed producers into a barrier hub.
//!
//! ## Contents
//! - [`Produce`] subscribe-style producer interface (implemented by [`Channel`](crate::Channel))
//! - [`Synchronizer`] / [`SynchronizerBuilder`] one producer per registered type
//! - [`spawn_pump`] async bridge from a `tokio::sync::broadcast` stream

mod produce;
mod pump;
mod synchronizer;

pub use produce::Produce;
pub use pump::spawn_pump;
pub use synchronizer::{Synchronizer, SynchronizerBuilder};
