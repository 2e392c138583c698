use crate::channel::{Callback, Channel, Subscription};

/// Source of values of one type that a [`Synchronizer`](crate::Synchronizer)
/// can forward into a hub.
///
/// Anything with a subscribe-style interface qualifies; a plain [`Channel`]
/// is a producer already.
pub trait Produce<T>: Send + Sync + 'static {
    /// Registers `callback` for every value this producer emits.
    fn connect(&self, callback: Callback<T>) -> Subscription;
}

impl<T: Send + Sync + 'static> Produce<T> for Channel<T> {
    fn connect(&self, callback: Callback<T>) -> Subscription {
        self.subscribe_arc(callback)
    }
}
