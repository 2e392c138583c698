//! # Hub configuration.
//!
//! Provides [`HubConfig`], the settings a [`BarrierHub`](crate::BarrierHub) is
//! built with. The type groups themselves are not configuration: they are
//! declared through [`TypeRegistry`](crate::TypeRegistry).

/// What the lenient `send`/`subscribe` do with a type outside the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownTypePolicy {
    /// Drop silently (only an `UnknownType` hub event is emitted).
    Ignore,
    /// Drop and log a `tracing` warning.
    #[default]
    Warn,
}

/// Configuration for a barrier hub.
///
/// ## Field semantics
/// - `name`: label attached to logs and hub events, useful when several hubs coexist
/// - `unknown_type`: handling of sends/subscriptions for unregistered types
#[derive(Clone, Debug)]
pub struct HubConfig {
    /// Hub label for logs and events.
    pub name: String,

    /// Handling of unregistered types.
    pub unknown_type: UnknownTypePolicy,
}

impl HubConfig {
    /// Config with the given hub name and default policies.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if unknown types should be logged.
    #[inline]
    pub fn warn_on_unknown(&self) -> bool {
        self.unknown_type == UnknownTypePolicy::Warn
    }
}

impl Default for HubConfig {
    /// Default configuration:
    ///
    /// - `name = "hub"`
    /// - `unknown_type = UnknownTypePolicy::Warn`
    fn default() -> Self {
        Self {
            name: "hub".to_string(),
            unknown_type: UnknownTypePolicy::default(),
        }
    }
}
