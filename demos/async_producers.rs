//! # Example: async_producers
//!
//! Feeds a hub from `tokio::sync::broadcast` streams with [`spawn_pump`] and
//! prints hub bookkeeping through the built-in [`LogWriter`] observer.
//!
//! ## Flow
//! ```text
//! ticker task ─► broadcast<Tick>  ─► pump ─┐
//! config task ─► broadcast<Ready> ─► pump ─┼─► BarrierHub ─► subscribers
//!                                          │
//!                         LogWriter ◄──────┘ (HubEvents via tracing)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example async_producers --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use synchro::{spawn_pump, BarrierHub, HubConfig, LogWriter, Observe, TypeRegistry};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Tick(u32);
#[derive(Clone, Debug)]
struct Ready(&'static str);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = TypeRegistry::builder()
        .required::<Ready>()
        .listed::<Tick>()
        .build()?;
    let observers: Vec<Arc<dyn Observe>> = vec![Arc::new(LogWriter::new())];
    let hub = Arc::new(
        BarrierHub::with_config(registry, HubConfig::named("pipeline")).with_observers(observers),
    );

    let _ticks = hub.subscribe::<Tick, _>(|t| println!("tick {}", t.0));
    let _ready = hub.subscribe::<Ready, _>(|r| println!("ready: {}", r.0));

    let token = CancellationToken::new();
    let (tick_tx, tick_rx) = broadcast::channel(64);
    let (ready_tx, ready_rx) = broadcast::channel(4);

    let pumps = vec![
        spawn_pump(hub.clone(), tick_rx, token.clone()),
        spawn_pump(hub.clone(), ready_rx, token.clone()),
    ];

    let ticker = tokio::spawn(async move {
        for i in 0..6 {
            let _ = tick_tx.send(Tick(i));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    });

    tokio::time::sleep(Duration::from_millis(120)).await;
    let _ = ready_tx.send(Ready("configuration loaded"));

    ticker.await?;
    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();
    for pump in pumps {
        pump.await?;
    }
    Ok(())
}
