//! # LogWriter: hub event logger
//!
//! A minimal observer that renders hub events through `tracing`.
//! Use it for tests or demos; install a `tracing` subscriber to see the output.
//!
//! ## Example output
//! ```text
//! DEBUG synchro: [buffered] hub="telemetry" type="demo::Speed" group=optional
//! INFO  synchro: [barrier-opened] hub="telemetry" trigger="demo::Position" flushed=4
//! INFO  synchro: [reset] hub="telemetry"
//! WARN  synchro: [producer-lagged] hub="telemetry" type="demo::Alarm" skipped=3
//! ```

use crate::events::{HubEvent, HubEventKind};
use crate::observers::Observe;

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Observe for LogWriter {
    fn on_event(&self, e: &HubEvent) {
        let hub = e.hub.as_deref().unwrap_or("-");
        let ty = e.type_name.unwrap_or("-");
        match e.kind {
            HubEventKind::Buffered => {
                let group = e.group.map(|g| g.as_str()).unwrap_or("-");
                tracing::debug!("[buffered] hub={hub:?} type={ty:?} group={group}");
            }
            HubEventKind::BarrierOpened => {
                tracing::info!(
                    "[barrier-opened] hub={hub:?} trigger={ty:?} flushed={}",
                    e.count.unwrap_or(0)
                );
            }
            HubEventKind::Reset => {
                tracing::info!("[reset] hub={hub:?}");
            }
            HubEventKind::Cleared => {
                tracing::info!("[cleared] hub={hub:?}");
            }
            HubEventKind::UnknownType => {
                tracing::warn!("[unknown-type] hub={hub:?} type={ty:?}");
            }
            HubEventKind::ProducerLagged => {
                tracing::warn!(
                    "[producer-lagged] hub={hub:?} type={ty:?} skipped={}",
                    e.count.unwrap_or(0)
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
