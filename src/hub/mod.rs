//! Barrier hub: per-type channels, pending storage and barrier state.
//!
//! ## Contents
//! - [`BarrierHub`] the join point (send / subscribe / reset / clear)
//! - [`BarrierState`] accumulating vs live
//!
//! Pending storage (`pending`) is private: slots for required/optional types,
//! FIFO queues for listed types.

mod core;
mod pending;
mod state;

pub use self::core::BarrierHub;
pub use state::BarrierState;
