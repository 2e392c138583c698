//! # Synchronizer: producers wired into a barrier hub.
//!
//! The synchronizer declares the type groups by attaching one producer per
//! type, builds the [`BarrierHub`] and forwards every value a producer emits
//! into [`BarrierHub::send`]. It holds the forwarding subscriptions for its
//! own lifetime and revokes them on drop (or on [`Synchronizer::disconnect`]).
//!
//! ```text
//!   producer<A> ──connect──► forward ──► hub.send::<A>
//!   producer<B> ──connect──► forward ──► hub.send::<B>      ──► subscribers
//!   producer<C> ──connect──► forward ──► hub.send::<C>
//! ```
//!
//! The forwarding closures hold a weak reference to the hub, so a producer
//! that outlives the synchronizer does not keep the hub alive.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use synchro::Synchronizer;
//!
//! struct Fix(u32);
//! struct Note(&'static str);
//!
//! let sync = Synchronizer::builder()
//!     .required_channel::<Fix>()
//!     .listed_channel::<Note>()
//!     .build()
//!     .unwrap();
//!
//! let notes = Arc::new(AtomicUsize::new(0));
//! let n = notes.clone();
//! let _sub = sync.subscribe::<Note, _>(move |_| { n.fetch_add(1, Ordering::Relaxed); });
//!
//! let note_src = sync.channel_producer::<Note>().unwrap();
//! note_src.publish(Arc::new(Note("boot")));
//! assert_eq!(notes.load(Ordering::Relaxed), 0);
//!
//! sync.channel_producer::<Fix>().unwrap().publish(Arc::new(Fix(1)));
//! assert_eq!(notes.load(Ordering::Relaxed), 1);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::channel::{Channel, Subscription};
use crate::config::HubConfig;
use crate::error::RegistryError;
use crate::hub::BarrierHub;
use crate::observers::Observe;
use crate::registry::{Group, RegistryBuilder, TypeRegistry};

use super::Produce;

type AnyProducer = Arc<dyn Any + Send + Sync>;
type Connector = Box<dyn FnOnce(&Arc<BarrierHub>) -> Subscription + Send>;

/// Builder for [`Synchronizer`].
pub struct SynchronizerBuilder {
    registry: RegistryBuilder,
    producers: HashMap<TypeId, AnyProducer>,
    connectors: Vec<Connector>,
    config: HubConfig,
    observers: Vec<Arc<dyn Observe>>,
}

impl SynchronizerBuilder {
    fn new() -> Self {
        Self {
            registry: TypeRegistry::builder(),
            producers: HashMap::new(),
            connectors: Vec::new(),
            config: HubConfig::default(),
            observers: Vec::new(),
        }
    }

    /// Attaches the producer of a required type.
    #[must_use]
    pub fn required<T, P>(self, producer: P) -> Self
    where
        T: Send + Sync + 'static,
        P: Produce<T>,
    {
        self.attach::<T, P>(Group::Required, producer)
    }

    /// Attaches the producer of an optional type.
    #[must_use]
    pub fn optional<T, P>(self, producer: P) -> Self
    where
        T: Send + Sync + 'static,
        P: Produce<T>,
    {
        self.attach::<T, P>(Group::Optional, producer)
    }

    /// Attaches the producer of a listed type.
    #[must_use]
    pub fn listed<T, P>(self, producer: P) -> Self
    where
        T: Send + Sync + 'static,
        P: Produce<T>,
    {
        self.attach::<T, P>(Group::Listed, producer)
    }

    /// Declares a required type fed by a fresh [`Channel<T>`].
    #[must_use]
    pub fn required_channel<T: Send + Sync + 'static>(self) -> Self {
        self.required::<T, _>(Channel::<T>::new())
    }

    /// Declares an optional type fed by a fresh [`Channel<T>`].
    #[must_use]
    pub fn optional_channel<T: Send + Sync + 'static>(self) -> Self {
        self.optional::<T, _>(Channel::<T>::new())
    }

    /// Declares a listed type fed by a fresh [`Channel<T>`].
    #[must_use]
    pub fn listed_channel<T: Send + Sync + 'static>(self) -> Self {
        self.listed::<T, _>(Channel::<T>::new())
    }

    /// Sets the hub configuration.
    #[must_use]
    pub fn config(mut self, config: HubConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a hub observer.
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn Observe>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Builds the hub and connects every producer to it.
    ///
    /// # Errors
    /// Any [`RegistryError`] from the declared groups; no producer is connected then.
    pub fn build(self) -> Result<Synchronizer, RegistryError> {
        let registry = self.registry.build()?;
        let hub = Arc::new(
            BarrierHub::with_config(registry, self.config).with_observers(self.observers),
        );

        let connections = self
            .connectors
            .into_iter()
            .map(|connect| connect(&hub))
            .collect();

        Ok(Synchronizer {
            hub,
            producers: self.producers,
            connections,
        })
    }

    fn attach<T, P>(mut self, group: Group, producer: P) -> Self
    where
        T: Send + Sync + 'static,
        P: Produce<T>,
    {
        let id = TypeId::of::<T>();
        self.registry = self.registry.add::<T>(group);
        if self.producers.contains_key(&id) {
            // duplicate declaration, reported by `build`
            return self;
        }

        let producer = Arc::new(producer);
        self.producers.insert(id, Arc::clone(&producer) as AnyProducer);
        self.connectors.push(Box::new(move |hub: &Arc<BarrierHub>| {
            let hub = Arc::downgrade(hub);
            producer.connect(Arc::new(move |value: &Arc<T>| {
                if let Some(hub) = hub.upgrade() {
                    hub.send(Arc::clone(value));
                }
            }))
        }));
        self
    }
}

/// Producers wired into a [`BarrierHub`].
pub struct Synchronizer {
    hub: Arc<BarrierHub>,
    producers: HashMap<TypeId, AnyProducer>,
    connections: Vec<Subscription>,
}

impl Synchronizer {
    /// Starts a synchronizer declaration.
    #[must_use]
    pub fn builder() -> SynchronizerBuilder {
        SynchronizerBuilder::new()
    }

    /// The hub values are forwarded into.
    #[must_use]
    pub fn hub(&self) -> &Arc<BarrierHub> {
        &self.hub
    }

    /// Producer attached for type `T`, if it is of type `P`.
    #[must_use]
    pub fn producer<T: 'static, P: Send + Sync + 'static>(&self) -> Option<Arc<P>> {
        let producer = self.producers.get(&TypeId::of::<T>())?;
        Arc::clone(producer).downcast::<P>().ok()
    }

    /// Channel producer of type `T`, for types declared with `*_channel`.
    #[must_use]
    pub fn channel_producer<T: Send + Sync + 'static>(&self) -> Option<Arc<Channel<T>>> {
        self.producer::<T, Channel<T>>()
    }

    /// Registers `callback` on the hub for values of type `T`.
    pub fn subscribe<T, F>(&self, callback: F) -> Subscription
    where
        T: Send + Sync + 'static,
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.hub.subscribe::<T, F>(callback)
    }

    /// Resets the hub barrier; see [`BarrierHub::reset`].
    pub fn reset(&self) {
        self.hub.reset();
    }

    /// Resets the hub and revokes its subscriptions; see [`BarrierHub::clear`].
    ///
    /// Producer forwarding stays connected.
    pub fn clear(&self) {
        self.hub.clear();
    }

    /// Revokes the forwarding subscriptions. Idempotent.
    pub fn disconnect(&mut self) {
        for conn in &mut self.connections {
            conn.unsubscribe();
        }
    }

    /// True while every producer is still forwarding into the hub.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connections.iter().all(Subscription::is_connected)
    }
}

impl Drop for Synchronizer {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer")
            .field("hub", &self.hub)
            .field("producers", &self.producers.len())
            .finish()
    }
}
