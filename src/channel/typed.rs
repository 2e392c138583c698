//! # Channel: single-type publish/subscribe primitive.
//!
//! [`Channel<T>`] holds an ordered list of callbacks and invokes every one of
//! them, synchronously and in subscription order, for each published value.
//!
//! ## Rules
//! - `publish` works on a snapshot of the callback list taken when it starts:
//!   callbacks added or revoked during delivery take effect from the next publish.
//! - No lock is held while a callback runs, so callbacks may re-enter the
//!   channel (publish, subscribe, unsubscribe) without deadlocking.
//! - A panicking callback propagates to the publisher; callbacks after it in
//!   the list are not invoked for that value.
//!
//! ```text
//! publish(Arc<T>)
//!     │   snapshot under lock
//!     ├──────────────► cb#1(&value)
//!     ├──────────────► cb#2(&value)
//!     └──────────────► cb#N(&value)
//! ```

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::subscription::{Revoke, Subscription};

/// Callback invoked for each value published on a [`Channel<T>`].
pub type Callback<T> = Arc<dyn Fn(&Arc<T>) + Send + Sync>;

struct Inner<T> {
    callbacks: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

impl<T: 'static> Revoke for Inner<T> {
    fn revoke(&self, id: u64) -> bool {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|(cid, _)| *cid != id);
        callbacks.len() != before
    }

    fn is_registered(&self, id: u64) -> bool {
        self.callbacks.lock().iter().any(|(cid, _)| *cid == id)
    }
}

/// Publish/subscribe channel for values of one type.
///
/// Cloning is cheap and yields a handle to the same callback list.
pub struct Channel<T> {
    inner: Arc<Inner<T>>,
}

impl<T: Send + Sync + 'static> Channel<T> {
    /// Creates a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                callbacks: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Registers `callback`; it fires for every value published from now on.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.subscribe_arc(Arc::new(callback))
    }

    /// Registers an already shared callback.
    pub fn subscribe_arc(&self, callback: Callback<T>) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.callbacks.lock().push((id, callback));
        tracing::debug!(ty = std::any::type_name::<T>(), id, "subscription added");

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription::new(weak, id, std::any::type_name::<T>())
    }

    /// Invokes every currently registered callback with `value`.
    ///
    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, value: Arc<T>) {
        let snapshot: Vec<Callback<T>> = {
            let callbacks = self.inner.callbacks.lock();
            if callbacks.is_empty() {
                return;
            }
            callbacks.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for cb in snapshot {
            cb(&value);
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.callbacks.lock().len()
    }

    /// True if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriber_count() == 0
    }

    /// Revokes every subscription; outstanding handles become disconnected.
    pub fn clear(&self) {
        let dropped = std::mem::take(&mut *self.inner.callbacks.lock());
        if !dropped.is_empty() {
            tracing::debug!(
                ty = std::any::type_name::<T>(),
                count = dropped.len(),
                "channel cleared"
            );
        }
    }
}

impl<T: Send + Sync + 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("type", &std::any::type_name::<T>())
            .field("subscribers", &self.inner.callbacks.lock().len())
            .finish()
    }
}

/// Type-erased view of a [`Channel<T>`], used by the hub to hold channels of
/// different value types side by side.
pub(crate) trait ErasedChannel: Send + Sync {
    /// Publishes a value that is known to be an `Arc<T>` for this channel's `T`.
    fn publish_erased(&self, value: Arc<dyn Any + Send + Sync>);

    /// Revokes every subscription.
    fn clear(&self);

    /// Access to the concrete `Channel<T>`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Send + Sync + 'static> ErasedChannel for Channel<T> {
    fn publish_erased(&self, value: Arc<dyn Any + Send + Sync>) {
        match value.downcast::<T>() {
            Ok(value) => self.publish(value),
            Err(_) => {
                tracing::error!(
                    ty = std::any::type_name::<T>(),
                    "value type does not match channel; dropped"
                );
            }
        }
    }

    fn clear(&self) {
        Channel::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + Send + Sync + 'static>(
    ) -> (Arc<Mutex<Vec<T>>>, impl Fn(&Arc<T>) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &Arc<T>| sink.lock().push((**v).clone()))
    }

    #[test]
    fn test_publish_reaches_subscriber_until_unsubscribed() {
        let channel = Channel::<i32>::new();
        let (seen, cb) = recorder::<i32>();

        let mut sub = channel.subscribe(cb);
        channel.publish(Arc::new(5));
        assert_eq!(*seen.lock(), vec![5]);

        sub.unsubscribe();
        channel.publish(Arc::new(5));
        assert_eq!(*seen.lock(), vec![5]);
        assert!(!sub.is_connected());

        sub.unsubscribe();
    }

    #[test]
    fn test_callbacks_fire_in_subscription_order() {
        let channel = Channel::<&'static str>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let mut subs = Vec::new();
        for tag in ["first", "second", "third"] {
            let o = order.clone();
            subs.push(channel.subscribe(move |v: &Arc<&'static str>| {
                o.lock().push(format!("{tag}:{v}"));
            }));
        }

        channel.publish(Arc::new("x"));
        assert_eq!(*order.lock(), vec!["first:x", "second:x", "third:x"]);
    }

    #[test]
    fn test_all_callbacks_share_one_value() {
        let channel = Channel::<String>::new();
        let ptrs = Arc::new(Mutex::new(Vec::new()));

        let p1 = ptrs.clone();
        let _a = channel.subscribe(move |v: &Arc<String>| {
            p1.lock().push(Arc::as_ptr(v) as usize);
        });
        let p2 = ptrs.clone();
        let _b = channel.subscribe(move |v: &Arc<String>| {
            p2.lock().push(Arc::as_ptr(v) as usize);
        });

        let value = Arc::new("shared".to_string());
        channel.publish(value.clone());

        let ptrs = ptrs.lock();
        assert_eq!(ptrs.len(), 2);
        assert!(ptrs.iter().all(|p| *p == Arc::as_ptr(&value) as usize));
    }

    #[test]
    fn test_unsubscribe_removes_only_its_callback() {
        let channel = Channel::<u8>::new();
        let (seen_a, cb_a) = recorder::<u8>();
        let (seen_b, cb_b) = recorder::<u8>();

        let mut a = channel.subscribe(cb_a);
        let b = channel.subscribe(cb_b);
        a.unsubscribe();

        channel.publish(Arc::new(7));
        assert!(seen_a.lock().is_empty());
        assert_eq!(*seen_b.lock(), vec![7]);
        assert!(b.is_connected());
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let channel = Channel::<u8>::new();
        channel.publish(Arc::new(1));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_reentrant_publish_from_callback() {
        let channel = Channel::<u32>::new();
        let (seen, cb) = recorder::<u32>();
        let _rec = channel.subscribe(cb);

        let inner = channel.clone();
        let _echo = channel.subscribe(move |v: &Arc<u32>| {
            if **v < 3 {
                inner.publish(Arc::new(**v + 1));
            }
        });

        channel.publish(Arc::new(1));
        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_subscribe_during_publish_applies_next_time() {
        let channel = Channel::<u32>::new();
        let hits = Arc::new(Mutex::new(0usize));
        let late_subs = Arc::new(Mutex::new(Vec::new()));

        let ch = channel.clone();
        let h = hits.clone();
        let l = late_subs.clone();
        let _adder = channel.subscribe(move |_| {
            let h = h.clone();
            l.lock().push(ch.subscribe(move |_| *h.lock() += 1));
        });

        channel.publish(Arc::new(0));
        assert_eq!(*hits.lock(), 0);
        channel.publish(Arc::new(0));
        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn test_clear_disconnects_handles() {
        let channel = Channel::<u8>::new();
        let sub = channel.subscribe(|_| {});
        channel.clear();
        assert!(channel.is_empty());
        assert!(!sub.is_connected());
    }

    #[test]
    fn test_erased_publish_downcasts() {
        let channel = Channel::<u64>::new();
        let (seen, cb) = recorder::<u64>();
        let _sub = channel.subscribe(cb);

        let erased: &dyn ErasedChannel = &channel;
        erased.publish_erased(Arc::new(42u64));
        erased.publish_erased(Arc::new("wrong type"));
        assert_eq!(*seen.lock(), vec![42]);
        assert!(erased.as_any().downcast_ref::<Channel<u64>>().is_some());
    }
}
