//! Single-type publish/subscribe primitive.
//!
//! ## Contents
//! - [`Channel`] ordered callback list with synchronous fan-out
//! - [`Subscription`] / [`ScopedSubscription`] revocable handles
//!
//! The hub owns one channel per registered type; producers may be plain
//! channels too (see [`Produce`](crate::Produce)).

mod subscription;
mod typed;

pub use subscription::{ScopedSubscription, Subscription};
pub use typed::{Callback, Channel};

pub(crate) use typed::ErasedChannel;
