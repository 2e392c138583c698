//! # Revocable subscription handles.
//!
//! A [`Subscription`] binds one callback to one [`Channel`](crate::Channel).
//! The handle is an owned token: dropping it leaves the callback registered,
//! exactly like a detached connection. Call [`Subscription::unsubscribe`] to
//! revoke, or convert it with [`Subscription::scoped`] to get a guard that
//! revokes on drop.
//!
//! ## Rules
//! - Revocation removes exactly the callback this handle was issued for.
//! - Revoking twice (or revoking after the channel was cleared or dropped) is a no-op.
//! - An [`inert`](Subscription::inert) handle is bound to nothing and revokes nothing.

use std::fmt;
use std::sync::Weak;

/// Target side of a subscription: something that can forget a callback by id.
pub(crate) trait Revoke: Send + Sync {
    /// Removes the callback registered under `id`; returns `true` if it was present.
    fn revoke(&self, id: u64) -> bool;

    /// Returns `true` while the callback registered under `id` is still present.
    fn is_registered(&self, id: u64) -> bool;
}

/// Handle to one registered callback.
pub struct Subscription {
    target: Option<Weak<dyn Revoke>>,
    id: u64,
    type_name: &'static str,
}

impl Subscription {
    pub(crate) fn new(target: Weak<dyn Revoke>, id: u64, type_name: &'static str) -> Self {
        Self {
            target: Some(target),
            id,
            type_name,
        }
    }

    /// Handle that is bound to nothing.
    ///
    /// Returned when subscribing to a type the hub does not know.
    #[must_use]
    pub fn inert() -> Self {
        Self {
            target: None,
            id: 0,
            type_name: "<inert>",
        }
    }

    /// Revokes the callback. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(target) = self.target.take().and_then(|weak| weak.upgrade()) {
            if target.revoke(self.id) {
                tracing::debug!(ty = self.type_name, id = self.id, "subscription revoked");
            }
        }
    }

    /// Returns `true` while the callback is still registered on a live channel.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.target
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|target| target.is_registered(self.id))
    }

    /// Returns `true` for handles created by [`Subscription::inert`].
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.target.is_none() && self.id == 0
    }

    /// Name of the value type this subscription listens to.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Wraps the handle into a guard that revokes on drop.
    #[must_use]
    pub fn scoped(self) -> ScopedSubscription {
        ScopedSubscription { inner: Some(self) }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("type", &self.type_name)
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Subscription guard that revokes its callback when dropped.
#[derive(Debug)]
pub struct ScopedSubscription {
    inner: Option<Subscription>,
}

impl ScopedSubscription {
    /// Gives the handle back without revoking it.
    #[must_use]
    pub fn release(mut self) -> Subscription {
        self.inner.take().unwrap_or_else(Subscription::inert)
    }

    /// Returns `true` while the guarded callback is still registered.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.as_ref().is_some_and(Subscription::is_connected)
    }
}

impl Drop for ScopedSubscription {
    fn drop(&mut self) {
        if let Some(mut sub) = self.inner.take() {
            sub.unsubscribe();
        }
    }
}
