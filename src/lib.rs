//! # synchro
//!
//! **synchro** is a typed synchronization barrier for heterogeneous event
//! streams.
//!
//! A [`BarrierHub`] accepts values of several distinct types from independent
//! producers. Each type is declared *required*, *optional* or *listed*. Nothing
//! is delivered to subscribers until every required type has produced at least
//! one value; until then optional values are kept (latest wins) and listed
//! values are queued. The send that completes the required set opens the
//! barrier, flushes everything buffered, and from then on the hub forwards
//! every value immediately, until [`BarrierHub::reset`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ producer<A>  │   │ producer<B>  │   │ producer<C>  │
//!     │  (required)  │   │  (optional)  │   │   (listed)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Synchronizer (forwards each producer into hub.send::<T>)         │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  BarrierHub                                                       │
//! │  - TypeRegistry (closed set of types, one group each)             │
//! │  - pending storage (slot per required/optional, FIFO per listed)  │
//! │  - BarrierState (Accumulating ──all required──► Live)             │
//! │  - one Channel<T> per type                                        │
//! └──────┬──────────────────┬──────────────────┬──────────────┬───────┘
//!        ▼                  ▼                  ▼              ▼
//!   Channel<A>          Channel<B>         Channel<C>     ObserverSet
//!    cb, cb, ..          cb, ..             cb, ..        (HubEvents)
//! ```
//!
//! ### Barrier lifecycle
//! ```text
//! Accumulating:
//!   ├─► required  → slot (latest wins); all required present? → open
//!   ├─► optional  → slot (latest wins)
//!   └─► listed    → queue (FIFO)
//!
//! open: trigger, other required, optional, listed queues → Live
//!
//! Live:
//!   └─► every send published immediately
//!
//! reset(): pending emptied → Accumulating (subscriptions kept)
//! clear(): reset + every subscription revoked
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                       |
//! |-------------------|-----------------------------------------------------------|------------------------------------------|
//! | **Barrier**       | Join of typed streams with buffering until all required   | [`BarrierHub`], [`BarrierState`]         |
//! | **Registry**      | Construction-time declaration of type groups              | [`TypeRegistry`], [`Group`]              |
//! | **Channels**      | Single-type synchronous publish/subscribe                 | [`Channel`], [`Subscription`]            |
//! | **Wiring**        | One producer per type forwarded into a hub                | [`Synchronizer`], [`Produce`]            |
//! | **Async**         | Feed a hub from `tokio::sync::broadcast` streams          | [`spawn_pump`]                           |
//! | **Observers**     | Hook into hub bookkeeping (buffering, opening, reset)     | [`Observe`], [`HubEvent`]                |
//! | **Errors**        | Typed errors for declaration and strict operations        | [`RegistryError`], [`HubError`]          |
//! | **Configuration** | Hub name and unknown-type handling                        | [`HubConfig`]                            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use synchro::{BarrierHub, TypeRegistry};
//!
//! struct Position(i32);
//! struct Heading(i32);
//! struct Waypoint(&'static str);
//!
//! let registry = TypeRegistry::builder()
//!     .required::<Position>()
//!     .required::<Heading>()
//!     .listed::<Waypoint>()
//!     .build()
//!     .unwrap();
//! let hub = BarrierHub::new(registry);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let s = seen.clone();
//! let _wp = hub.subscribe::<Waypoint, _>(move |w| s.lock().unwrap().push(w.0));
//!
//! hub.emit(Waypoint("dock"));
//! hub.emit(Position(1));
//! assert!(seen.lock().unwrap().is_empty());
//!
//! hub.emit(Heading(90));
//! assert_eq!(*seen.lock().unwrap(), vec!["dock"]);
//!
//! hub.emit(Waypoint("bay"));
//! assert_eq!(*seen.lock().unwrap(), vec!["dock", "bay"]);
//! ```
mod channel;
mod config;
mod error;
mod events;
mod hub;
mod observers;
mod registry;
mod wiring;

// ---- Public re-exports ----

pub use channel::{Callback, Channel, ScopedSubscription, Subscription};
pub use config::{HubConfig, UnknownTypePolicy};
pub use error::{HubError, RegistryError};
pub use events::{HubEvent, HubEventKind};
pub use hub::{BarrierHub, BarrierState};
pub use observers::{Observe, ObserverSet};
pub use registry::{Group, RegistryBuilder, TypeRegistry};
pub use wiring::{spawn_pump, Produce, Synchronizer, SynchronizerBuilder};

// Optional: expose a simple built-in logger observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
