//! # Async producer pump.
//!
//! Bridges a `tokio::sync::broadcast` stream into a shared hub: every received
//! value is sent through the barrier on the pump task.
//!
//! ```text
//!   broadcast::Sender<T> ──► Receiver<T> ──► pump task ──► hub.emit::<T>
//!                                              │
//!                                   cancel ────┘ (CancellationToken)
//! ```
//!
//! ## Rules
//! - The pump stops when the token is cancelled or every sender is dropped
//!   (values still buffered in the receiver are delivered first in that case).
//! - A lagging receiver skips the oldest values; the pump logs a warning and
//!   emits a `ProducerLagged` hub event with the number of skipped values.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{HubEvent, HubEventKind};
use crate::hub::BarrierHub;

/// Spawns a task forwarding `rx` into `hub` until `token` is cancelled or the
/// channel closes.
///
/// Must be called from within a tokio runtime.
pub fn spawn_pump<T>(
    hub: Arc<BarrierHub>,
    mut rx: broadcast::Receiver<T>,
    token: CancellationToken,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    let type_name = std::any::type_name::<T>();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Ok(value) => hub.emit(value),
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            hub = hub.name(),
                            ty = type_name,
                            skipped,
                            "producer lagged"
                        );
                        hub.notify(|| {
                            HubEvent::new(HubEventKind::ProducerLagged)
                                .with_type(type_name)
                                .with_count(skipped)
                        });
                        continue;
                    }
                }
            }
        }
        tracing::debug!(hub = hub.name(), ty = type_name, "pump stopped");
    })
}
