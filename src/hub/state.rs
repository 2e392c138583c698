use std::fmt;

/// Barrier state of a hub.
///
/// Starts as `Accumulating`; flips to `Live` when every required type holds a
/// value, and only goes back through an explicit reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BarrierState {
    /// Required and optional values are buffered, listed values queued.
    #[default]
    Accumulating,
    /// Every send is published immediately.
    Live,
}

impl BarrierState {
    /// Returns a short stable label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarrierState::Accumulating => "accumulating",
            BarrierState::Live => "live",
        }
    }
}

impl fmt::Display for BarrierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
