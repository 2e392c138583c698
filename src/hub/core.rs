//! # BarrierHub: type-keyed join of heterogeneous event streams.
//!
//! The hub owns one [`Channel`] per registered type, the pending storage and
//! the barrier state. Nothing reaches subscribers until every required type
//! has been sent at least once; the send that completes the set opens the
//! barrier and flushes everything buffered so far. From then on the hub is a
//! plain multiplexer until [`BarrierHub::reset`].
//!
//! ## Send rules
//! ```text
//!                    Accumulating                      Live
//!  required   store slot (latest wins);        publish now, then flush pass
//!             if all required present:         (empty, state stays Live)
//!             open barrier + flush
//!  optional   store slot (latest wins)         publish now
//!  listed     append to queue (FIFO)           publish now
//!  unknown    dropped                          dropped
//! ```
//!
//! ## Flush order (barrier-opening send)
//! 1. the triggering required value;
//! 2. other required values, registration order;
//! 3. optional values, registration order;
//! 4. listed queues, registration order, each in FIFO order.
//!
//! ## Concurrency
//! State and pending storage sit behind one mutex, so the "all required
//! present" check and the flush are atomic with respect to other senders. The
//! lock is released before any callback runs: the barrier-opening send takes
//! the whole pending content and switches to `Live` first, then publishes.
//! Callbacks may therefore call back into the hub; a nested send sees the
//! `Live` state and is published immediately.
//!
//! Sends, resets and clears are also serialized by a re-entrant delivery
//! guard held until publishing is done. Another thread's send waits for the
//! flush in progress, so queued values always reach subscribers before later
//! ones. A callback must not block on another thread that sends into the same
//! hub.
//!
//! Every reset or clear starts a new epoch. Publishing stops as soon as the
//! epoch a batch was decided in is over, so a `reset()` from a callback drops
//! the rest of the flush.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use synchro::{BarrierHub, TypeRegistry};
//!
//! struct Position(f64);
//! struct Speed(f64);
//!
//! let registry = TypeRegistry::builder()
//!     .required::<Position>()
//!     .optional::<Speed>()
//!     .build()
//!     .unwrap();
//! let hub = BarrierHub::new(registry);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let s = seen.clone();
//! let _sub = hub.subscribe::<Speed, _>(move |v| s.lock().unwrap().push(v.0));
//!
//! hub.emit(Speed(1.5));
//! assert!(seen.lock().unwrap().is_empty());
//!
//! hub.emit(Position(0.0));
//! assert_eq!(*seen.lock().unwrap(), vec![1.5]);
//! assert!(hub.is_live());
//! ```

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};

use crate::channel::{Channel, ErasedChannel, Subscription};
use crate::config::HubConfig;
use crate::error::HubError;
use crate::events::{HubEvent, HubEventKind};
use crate::observers::{Observe, ObserverSet};
use crate::registry::{Group, TypeRegistry};

use super::pending::{Batch, PendingStore, Value};
use super::state::BarrierState;

/// Mutable part of the hub, guarded as a whole.
struct Inner {
    state: BarrierState,
    pending: PendingStore,
    /// Bumped by every reset/clear.
    epoch: u64,
}

/// What a send turned into, decided under the lock and acted on outside it.
enum Dispatch {
    /// Barrier was (or is now) live: publish these values in order.
    Publish { batch: Batch, epoch: u64 },
    /// Value went to pending storage.
    Buffered { required_filled: usize },
    /// This send opened the barrier: publish the flush batch.
    Opened { batch: Batch, epoch: u64 },
}

impl Inner {
    fn accept(&mut self, idx: usize, group: Group, value: Value) -> Dispatch {
        match (self.state, group) {
            (BarrierState::Live, Group::Required) => {
                let mut batch = vec![(idx, value)];
                batch.extend(self.pending.drain(None));
                self.state = BarrierState::Live;
                Dispatch::Publish {
                    batch,
                    epoch: self.epoch,
                }
            }
            (BarrierState::Live, _) => Dispatch::Publish {
                batch: vec![(idx, value)],
                epoch: self.epoch,
            },
            (BarrierState::Accumulating, group) => {
                self.pending.store(idx, value);
                if group == Group::Required && self.pending.all_required_present() {
                    let batch = self.pending.drain(Some(idx));
                    self.state = BarrierState::Live;
                    Dispatch::Opened {
                        batch,
                        epoch: self.epoch,
                    }
                } else {
                    Dispatch::Buffered {
                        required_filled: self.pending.required_filled(),
                    }
                }
            }
        }
    }

    /// Drops every buffered value, closes the barrier and ends the epoch.
    fn restart(&mut self) {
        self.pending.clear();
        self.state = BarrierState::Accumulating;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

/// Synchronization barrier over a closed set of event types.
///
/// Share it with `Arc<BarrierHub>`; every method takes `&self`.
pub struct BarrierHub {
    registry: TypeRegistry,
    channels: Vec<Box<dyn ErasedChannel>>,
    inner: Mutex<Inner>,
    delivery: ReentrantMutex<()>,
    observers: ObserverSet,
    config: HubConfig,
    name: Arc<str>,
}

impl BarrierHub {
    /// Creates a hub for `registry` with the default configuration.
    #[must_use]
    pub fn new(registry: TypeRegistry) -> Self {
        Self::with_config(registry, HubConfig::default())
    }

    /// Creates a hub for `registry` with the given configuration.
    #[must_use]
    pub fn with_config(registry: TypeRegistry, config: HubConfig) -> Self {
        let channels = registry
            .entries()
            .iter()
            .map(|entry| (entry.make_channel)())
            .collect();
        let pending = PendingStore::new(registry.entries());
        let name: Arc<str> = Arc::from(config.name.as_str());

        Self {
            registry,
            channels,
            inner: Mutex::new(Inner {
                state: BarrierState::Accumulating,
                pending,
                epoch: 0,
            }),
            delivery: ReentrantMutex::new(()),
            observers: ObserverSet::default(),
            config,
            name,
        }
    }

    /// Attaches observers that receive this hub's [`HubEvent`]s.
    #[must_use]
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        for obs in observers {
            self.observers.push(obs);
        }
        self
    }

    /// Sends a value of type `T` through the barrier.
    ///
    /// Unregistered types are dropped (see [`HubConfig::unknown_type`]).
    /// A panicking subscriber propagates out of this call; values published
    /// before it have already been delivered.
    pub fn send<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        if self.try_send(value).is_err() {
            self.report_unknown(std::any::type_name::<T>());
        }
    }

    /// Wraps `value` in an `Arc` and [`send`](Self::send)s it.
    pub fn emit<T: Send + Sync + 'static>(&self, value: T) {
        self.send(Arc::new(value));
    }

    /// Strict variant of [`send`](Self::send).
    ///
    /// # Errors
    /// [`HubError::UnknownType`] if `T` is not registered; nothing is sent.
    pub fn try_send<T: Send + Sync + 'static>(&self, value: Arc<T>) -> Result<(), HubError> {
        let type_name = std::any::type_name::<T>();
        let idx = self
            .registry
            .position(TypeId::of::<T>())
            .ok_or(HubError::UnknownType { type_name })?;
        let group = self.registry.entries()[idx].group;

        let _delivery = self.delivery.lock();
        let dispatch = self.inner.lock().accept(idx, group, value);

        match dispatch {
            Dispatch::Publish { batch, epoch } => self.publish(batch, epoch),
            Dispatch::Buffered { required_filled } => {
                self.notify(|| {
                    HubEvent::new(HubEventKind::Buffered)
                        .with_type(type_name)
                        .with_group(group)
                        .with_count(required_filled as u64)
                });
            }
            Dispatch::Opened { batch, epoch } => {
                tracing::debug!(
                    hub = %self.name,
                    trigger = type_name,
                    flushed = batch.len(),
                    "barrier opened"
                );
                let flushed = batch.len() as u64;
                self.notify(|| {
                    HubEvent::new(HubEventKind::BarrierOpened)
                        .with_type(type_name)
                        .with_group(Group::Required)
                        .with_count(flushed)
                });
                self.publish(batch, epoch);
            }
        }
        Ok(())
    }

    /// Registers `callback` for values of type `T`.
    ///
    /// For an unregistered type the returned handle is inert.
    pub fn subscribe<T, F>(&self, callback: F) -> Subscription
    where
        T: Send + Sync + 'static,
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        match self.channel::<T>() {
            Some(channel) => channel.subscribe(callback),
            None => {
                self.report_unknown(std::any::type_name::<T>());
                Subscription::inert()
            }
        }
    }

    /// Strict variant of [`subscribe`](Self::subscribe).
    ///
    /// # Errors
    /// [`HubError::UnknownType`] if `T` is not registered.
    pub fn try_subscribe<T, F>(&self, callback: F) -> Result<Subscription, HubError>
    where
        T: Send + Sync + 'static,
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.channel::<T>()
            .map(|channel| channel.subscribe(callback))
            .ok_or(HubError::UnknownType {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Empties pending storage and closes the barrier again.
    ///
    /// Subscriptions are kept. Idempotent. Called from a callback, it also
    /// stops the flush in progress: nothing more is published until the
    /// required set fills again.
    pub fn reset(&self) {
        let _delivery = self.delivery.lock();
        self.inner.lock().restart();
        tracing::debug!(hub = %self.name, "barrier reset");
        self.notify(|| HubEvent::new(HubEventKind::Reset));
    }

    /// [`reset`](Self::reset) plus revocation of every subscription on every channel.
    pub fn clear(&self) {
        let _delivery = self.delivery.lock();
        self.inner.lock().restart();
        for channel in &self.channels {
            channel.clear();
        }
        tracing::debug!(hub = %self.name, "hub cleared");
        self.notify(|| HubEvent::new(HubEventKind::Cleared));
    }

    /// Current barrier state.
    #[must_use]
    pub fn state(&self) -> BarrierState {
        self.inner.lock().state
    }

    /// True once the barrier has opened (and until the next reset).
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state() == BarrierState::Live
    }

    /// Number of required types currently holding a buffered value.
    #[must_use]
    pub fn pending_required(&self) -> usize {
        self.inner.lock().pending.required_filled()
    }

    /// True if no value is buffered.
    #[must_use]
    pub fn is_pending_empty(&self) -> bool {
        self.inner.lock().pending.is_empty()
    }

    /// Handle to the channel of type `T`, if registered.
    #[must_use]
    pub fn channel<T: Send + Sync + 'static>(&self) -> Option<Channel<T>> {
        let idx = self.registry.position(TypeId::of::<T>())?;
        self.channels[idx]
            .as_any()
            .downcast_ref::<Channel<T>>()
            .cloned()
    }

    /// The registry this hub was built from.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Hub configuration.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Hub name, as configured.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits a hub event to the observers, stamped with this hub's name.
    pub(crate) fn notify(&self, make: impl FnOnce() -> HubEvent) {
        if self.observers.is_empty() {
            return;
        }
        let event = make().with_hub(Arc::clone(&self.name));
        self.observers.emit(&event);
    }

    /// Publishes `batch` in order while `epoch` is still current.
    fn publish(&self, batch: Batch, epoch: u64) {
        for (idx, value) in batch {
            if self.inner.lock().epoch != epoch {
                tracing::debug!(hub = %self.name, "epoch ended; rest of batch dropped");
                return;
            }
            self.channels[idx].publish_erased(value);
        }
    }

    fn report_unknown(&self, type_name: &'static str) {
        if self.config.warn_on_unknown() {
            tracing::warn!(hub = %self.name, ty = type_name, "type not registered; dropped");
        }
        self.notify(|| HubEvent::new(HubEventKind::UnknownType).with_type(type_name));
    }
}

impl fmt::Debug for BarrierHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BarrierHub")
            .field("name", &self.name)
            .field("state", &inner.state)
            .field("types", &self.registry.len())
            .field("pending_required", &inner.pending.required_filled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct R1(&'static str);
    #[derive(Debug)]
    struct R2(&'static str);
    #[derive(Debug)]
    struct O1(&'static str);
    #[derive(Debug)]
    struct L1(&'static str);
    struct Stranger;

    type Log = Arc<Mutex<Vec<String>>>;

    fn hub() -> BarrierHub {
        let registry = TypeRegistry::builder()
            .required::<R1>()
            .required::<R2>()
            .optional::<O1>()
            .listed::<L1>()
            .build()
            .unwrap();
        BarrierHub::new(registry)
    }

    /// Subscribes a recorder on every type; entries look like `"R1:r1"`.
    fn record_all(hub: &BarrierHub) -> (Log, Vec<Subscription>) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let l = log.clone();
        let a = hub.subscribe::<R1, _>(move |v| l.lock().push(format!("R1:{}", v.0)));
        let l = log.clone();
        let b = hub.subscribe::<R2, _>(move |v| l.lock().push(format!("R2:{}", v.0)));
        let l = log.clone();
        let c = hub.subscribe::<O1, _>(move |v| l.lock().push(format!("O1:{}", v.0)));
        let l = log.clone();
        let d = hub.subscribe::<L1, _>(move |v| l.lock().push(format!("L1:{}", v.0)));
        (log, vec![a, b, c, d])
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock())
    }

    #[test]
    fn test_full_cycle_scenario() {
        let hub = hub();
        let (log, _subs) = record_all(&hub);

        hub.emit(O1("a"));
        hub.emit(L1("x"));
        hub.emit(L1("y"));
        hub.emit(R1("r1"));
        assert!(drain(&log).is_empty());
        assert_eq!(hub.state(), BarrierState::Accumulating);
        assert_eq!(hub.pending_required(), 1);

        hub.emit(R2("r2"));
        assert_eq!(
            drain(&log),
            vec!["R2:r2", "R1:r1", "O1:a", "L1:x", "L1:y"]
        );
        assert!(hub.is_live());
        assert!(hub.is_pending_empty());

        hub.emit(R1("r1b"));
        assert_eq!(drain(&log), vec!["R1:r1b"]);

        hub.reset();
        assert_eq!(hub.state(), BarrierState::Accumulating);
        hub.emit(R1("r1c"));
        assert!(drain(&log).is_empty());
        assert_eq!(hub.pending_required(), 1);
    }

    #[test]
    fn test_nothing_fires_until_all_required_present() {
        let hub = hub();
        let (log, _subs) = record_all(&hub);

        for _ in 0..3 {
            hub.emit(R1("again"));
            hub.emit(O1("o"));
            hub.emit(L1("l"));
        }
        assert!(drain(&log).is_empty());
        assert!(!hub.is_live());
    }

    #[test]
    fn test_latest_wins_for_required_and_optional() {
        let hub = hub();
        let (log, _subs) = record_all(&hub);

        hub.emit(R1("first"));
        hub.emit(R1("second"));
        hub.emit(O1("old"));
        hub.emit(O1("new"));
        hub.emit(R2("go"));

        assert_eq!(drain(&log), vec!["R2:go", "R1:second", "O1:new"]);
    }

    #[test]
    fn test_listed_values_flush_in_fifo_order() {
        let hub = hub();
        let (log, _subs) = record_all(&hub);

        let names = ["l0", "l1", "l2", "l3", "l4"];
        for n in names {
            hub.emit(L1(n));
        }
        hub.emit(R2("b"));
        hub.emit(R1("a"));

        let got = drain(&log);
        let listed: Vec<&str> = got
            .iter()
            .filter_map(|s| s.strip_prefix("L1:"))
            .collect();
        assert_eq!(listed, names);
        assert_eq!(&got[..2], ["R1:a", "R2:b"]);
    }

    #[test]
    fn test_live_sends_pass_through_once() {
        let hub = hub();
        hub.emit(R1("a"));
        hub.emit(R2("b"));
        let (log, _subs) = record_all(&hub);

        hub.emit(O1("o"));
        hub.emit(L1("l"));
        hub.emit(R2("r"));
        hub.emit(L1("m"));
        assert_eq!(drain(&log), vec!["O1:o", "L1:l", "R2:r", "L1:m"]);
        assert!(hub.is_pending_empty());
    }

    #[test]
    fn test_reset_keeps_subscriptions_and_recloses_barrier() {
        let hub = hub();
        let (log, subs) = record_all(&hub);
        hub.emit(R1("a"));
        hub.emit(R2("b"));
        drain(&log);

        hub.reset();
        hub.reset();
        assert!(subs.iter().all(Subscription::is_connected));

        hub.emit(L1("queued"));
        hub.emit(R2("b2"));
        assert!(drain(&log).is_empty());
        hub.emit(R1("a2"));
        assert_eq!(drain(&log), vec!["R1:a2", "R2:b2", "L1:queued"]);
    }

    #[test]
    fn test_reset_discards_buffered_values() {
        let hub = hub();
        let (log, _subs) = record_all(&hub);

        hub.emit(R1("stale"));
        hub.emit(O1("stale"));
        hub.emit(L1("stale"));
        hub.reset();
        assert!(hub.is_pending_empty());

        hub.emit(R1("fresh"));
        hub.emit(R2("fresh"));
        assert_eq!(drain(&log), vec!["R2:fresh", "R1:fresh"]);
    }

    #[test]
    fn test_clear_revokes_subscriptions() {
        let hub = hub();
        let (log, subs) = record_all(&hub);
        hub.emit(R1("a"));

        hub.clear();
        assert!(subs.iter().all(|s| !s.is_connected()));
        assert!(!hub.is_live());
        assert!(hub.is_pending_empty());

        hub.emit(R1("a"));
        hub.emit(R2("b"));
        assert!(drain(&log).is_empty());
        assert!(hub.is_live());
    }

    #[test]
    fn test_unknown_type_is_noop() {
        let hub = hub();
        let (log, _subs) = record_all(&hub);

        hub.emit(Stranger);
        let mut sub = hub.subscribe::<Stranger, _>(|_| {});
        assert!(sub.is_inert());
        sub.unsubscribe();

        assert_eq!(
            hub.try_send(Arc::new(Stranger)),
            Err(HubError::UnknownType {
                type_name: std::any::type_name::<Stranger>()
            })
        );
        assert!(hub.try_subscribe::<Stranger, _>(|_| {}).is_err());
        assert!(drain(&log).is_empty());
        assert!(hub.is_pending_empty());
    }

    #[test]
    fn test_multiple_subscribers_same_type_all_fire() {
        let hub = hub();
        let count = Arc::new(Mutex::new(0));
        let mut subs = Vec::new();
        for _ in 0..3 {
            let c = count.clone();
            subs.push(hub.subscribe::<R1, _>(move |_| *c.lock() += 1));
        }
        hub.emit(R1("a"));
        hub.emit(R2("b"));
        assert_eq!(*count.lock(), 3);

        subs[1].unsubscribe();
        hub.emit(R1("c"));
        assert_eq!(*count.lock(), 5);
    }

    #[test]
    fn test_reentrant_send_from_flush_callback() {
        let hub = Arc::new(hub());
        let (log, _subs) = record_all(&hub);

        let h = Arc::clone(&hub);
        let _echo = hub.subscribe::<R2, _>(move |_| h.emit(L1("nested")));

        hub.emit(L1("queued"));
        hub.emit(R1("a"));
        hub.emit(R2("b"));

        assert_eq!(
            drain(&log),
            vec!["R2:b", "L1:nested", "R1:a", "L1:queued"]
        );
        assert!(hub.is_live());
    }

    #[test]
    fn test_send_from_other_thread_waits_for_flush() {
        let hub = Arc::new(hub());
        let (log, _subs) = record_all(&hub);

        let worker = Arc::new(Mutex::new(None));
        let h = Arc::clone(&hub);
        let w = Arc::clone(&worker);
        let _spawn = hub.subscribe::<R2, _>(move |_| {
            let h = Arc::clone(&h);
            *w.lock() = Some(std::thread::spawn(move || h.emit(L1("late"))));
            // give the other thread time to race the rest of the flush
            std::thread::sleep(std::time::Duration::from_millis(20));
        });

        hub.emit(L1("queued"));
        hub.emit(R1("a"));
        hub.emit(R2("b"));
        let handle = worker.lock().take().unwrap();
        handle.join().unwrap();

        assert_eq!(
            drain(&log),
            vec!["R2:b", "R1:a", "L1:queued", "L1:late"]
        );
    }

    #[test]
    fn test_reset_from_flush_callback_stops_flush() {
        let hub = Arc::new(hub());
        let (log, _subs) = record_all(&hub);

        let h = Arc::clone(&hub);
        let mut resetter = hub.subscribe::<R2, _>(move |_| h.reset());

        hub.emit(L1("queued"));
        hub.emit(O1("o"));
        hub.emit(R1("a"));
        hub.emit(R2("b"));

        assert_eq!(drain(&log), vec!["R2:b"]);
        assert_eq!(hub.state(), BarrierState::Accumulating);
        assert!(hub.is_pending_empty());

        resetter.unsubscribe();
        hub.emit(L1("fresh"));
        hub.emit(R1("a2"));
        assert!(drain(&log).is_empty());
        hub.emit(R2("b2"));
        assert_eq!(drain(&log), vec!["R2:b2", "R1:a2", "L1:fresh"]);
    }

    #[test]
    fn test_panicking_callback_propagates() {
        let hub = hub();
        let (log, _subs) = record_all(&hub);
        let _bomb = hub.subscribe::<O1, _>(|_| panic!("subscriber failure"));

        hub.emit(O1("o"));
        hub.emit(L1("l"));
        hub.emit(R1("a"));
        let result = panic::catch_unwind(AssertUnwindSafe(|| hub.emit(R2("b"))));
        assert!(result.is_err());

        // values before the failing channel were delivered, the rest was lost
        assert_eq!(drain(&log), vec!["R2:b", "R1:a", "O1:o"]);
        assert!(hub.is_live());

        hub.emit(L1("after"));
        assert_eq!(drain(&log), vec!["L1:after"]);
    }

    #[test]
    fn test_observers_see_bookkeeping() {
        struct Kinds(Mutex<Vec<HubEventKind>>);
        impl Observe for Kinds {
            fn on_event(&self, event: &HubEvent) {
                assert_eq!(event.hub.as_deref(), Some("obs"));
                self.0.lock().push(event.kind);
            }
        }

        let kinds = Arc::new(Kinds(Mutex::new(Vec::new())));
        let registry = TypeRegistry::builder()
            .required::<R1>()
            .listed::<L1>()
            .build()
            .unwrap();
        let hub = BarrierHub::with_config(registry, HubConfig::named("obs"))
            .with_observers(vec![kinds.clone() as Arc<dyn Observe>]);

        hub.emit(L1("l"));
        hub.emit(R1("a"));
        hub.emit(R1("b"));
        hub.emit(Stranger);
        hub.reset();
        hub.clear();

        assert_eq!(
            *kinds.0.lock(),
            vec![
                HubEventKind::Buffered,
                HubEventKind::BarrierOpened,
                HubEventKind::UnknownType,
                HubEventKind::Reset,
                HubEventKind::Cleared,
            ]
        );
    }

    struct Opened(AtomicUsize);

    impl Observe for Opened {
        fn on_event(&self, event: &HubEvent) {
            if event.kind == HubEventKind::BarrierOpened {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_concurrent_senders_open_barrier_once() {
        let registry = TypeRegistry::builder()
            .required::<R1>()
            .required::<R2>()
            .listed::<L1>()
            .build()
            .unwrap();
        let opened = Arc::new(Opened(AtomicUsize::new(0)));
        let hub = Arc::new(
            BarrierHub::new(registry).with_observers(vec![opened.clone() as Arc<dyn Observe>]),
        );
        let (log, _subs) = record_all(&hub);

        let threads: Vec<_> = (0..4)
            .map(|i| {
                let hub = Arc::clone(&hub);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        hub.emit(L1("l"));
                        if i % 2 == 0 {
                            hub.emit(R1("a"));
                        } else {
                            hub.emit(R2("b"));
                        }
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        let got = drain(&log);
        assert!(hub.is_live());
        assert_eq!(got.iter().filter(|s| s.starts_with("L1:")).count(), 200);
        assert_eq!(opened.0.load(Ordering::SeqCst), 1);
    }
}
