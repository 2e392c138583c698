//! # Pending storage for values that arrive before the barrier opens.
//!
//! One entry per registered type, indexed like the registry:
//! - required/optional types own a slot holding at most one value (latest wins);
//! - listed types own an unbounded FIFO queue.
//!
//! The store also counts filled required slots, so the barrier check is O(1).

use std::any::Any;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::registry::{Group, TypeEntry};

/// Type-erased value as stored and published by the hub.
pub(crate) type Value = Arc<dyn Any + Send + Sync>;

/// Values to publish, as `(registry index, value)` in publish order.
pub(crate) type Batch = Vec<(usize, Value)>;

enum Entry {
    Slot(Option<Value>),
    Queue(VecDeque<Value>),
}

pub(crate) struct PendingStore {
    entries: Vec<Entry>,
    groups: Vec<Group>,
    required_total: usize,
    required_filled: usize,
}

impl PendingStore {
    pub(crate) fn new(types: &[TypeEntry]) -> Self {
        let entries = types
            .iter()
            .map(|t| match t.group {
                Group::Listed => Entry::Queue(VecDeque::new()),
                Group::Required | Group::Optional => Entry::Slot(None),
            })
            .collect();
        let groups: Vec<Group> = types.iter().map(|t| t.group).collect();
        let required_total = groups.iter().filter(|g| **g == Group::Required).count();

        Self {
            entries,
            groups,
            required_total,
            required_filled: 0,
        }
    }

    /// Buffers `value` for the type at `idx`: overwrite a slot, append to a queue.
    pub(crate) fn store(&mut self, idx: usize, value: Value) {
        match &mut self.entries[idx] {
            Entry::Slot(slot) => {
                if slot.replace(value).is_none() && self.groups[idx] == Group::Required {
                    self.required_filled += 1;
                }
            }
            Entry::Queue(queue) => queue.push_back(value),
        }
    }

    /// True when every required slot holds a value.
    pub(crate) fn all_required_present(&self) -> bool {
        self.required_filled == self.required_total
    }

    /// Number of required slots currently holding a value.
    pub(crate) fn required_filled(&self) -> usize {
        self.required_filled
    }

    /// Empties the whole store and returns its content in flush order.
    ///
    /// Order: `trigger` first (if given and buffered), then the remaining
    /// required slots, optional slots, and listed queues in FIFO order; each
    /// group in registration order.
    pub(crate) fn drain(&mut self, trigger: Option<usize>) -> Batch {
        let mut batch = Batch::new();

        if let Some(idx) = trigger {
            if let Some(value) = self.take_slot(idx) {
                batch.push((idx, value));
            }
        }

        for group in [Group::Required, Group::Optional] {
            for idx in 0..self.entries.len() {
                if self.groups[idx] == group {
                    if let Some(value) = self.take_slot(idx) {
                        batch.push((idx, value));
                    }
                }
            }
        }

        for (idx, entry) in self.entries.iter_mut().enumerate() {
            if let Entry::Queue(queue) = entry {
                batch.extend(queue.drain(..).map(|value| (idx, value)));
            }
        }

        debug_assert_eq!(self.required_filled, 0);
        batch
    }

    /// Drops every buffered value.
    pub(crate) fn clear(&mut self) {
        for entry in &mut self.entries {
            match entry {
                Entry::Slot(slot) => *slot = None,
                Entry::Queue(queue) => queue.clear(),
            }
        }
        self.required_filled = 0;
    }

    /// True if nothing is buffered.
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| match entry {
            Entry::Slot(slot) => slot.is_none(),
            Entry::Queue(queue) => queue.is_empty(),
        })
    }

    fn take_slot(&mut self, idx: usize) -> Option<Value> {
        let Entry::Slot(slot) = &mut self.entries[idx] else {
            return None;
        };
        let value = slot.take();
        if value.is_some() && self.groups[idx] == Group::Required {
            self.required_filled -= 1;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRegistry;

    struct R1;
    struct R2;
    struct O1;
    struct L1;

    fn store() -> PendingStore {
        let registry = TypeRegistry::builder()
            .required::<R1>()
            .required::<R2>()
            .optional::<O1>()
            .listed::<L1>()
            .build()
            .unwrap();
        PendingStore::new(registry.entries())
    }

    fn val(n: u32) -> Value {
        Arc::new(n)
    }

    fn as_u32(v: &Value) -> u32 {
        *v.downcast_ref::<u32>().unwrap()
    }

    #[test]
    fn test_required_counting_ignores_overwrites() {
        let mut s = store();
        s.store(0, val(1));
        s.store(0, val(2));
        assert_eq!(s.required_filled(), 1);
        assert!(!s.all_required_present());

        s.store(2, val(3));
        assert_eq!(s.required_filled(), 1);

        s.store(1, val(4));
        assert!(s.all_required_present());
    }

    #[test]
    fn test_drain_order_trigger_first() {
        let mut s = store();
        s.store(3, val(30));
        s.store(2, val(20));
        s.store(0, val(1));
        s.store(3, val(31));
        s.store(1, val(2));

        let batch = s.drain(Some(1));
        let flat: Vec<(usize, u32)> = batch.iter().map(|(i, v)| (*i, as_u32(v))).collect();
        assert_eq!(flat, vec![(1, 2), (0, 1), (2, 20), (3, 30), (3, 31)]);
        assert!(s.is_empty());
        assert_eq!(s.required_filled(), 0);
    }

    #[test]
    fn test_drain_empty_store_is_empty() {
        let mut s = store();
        assert!(s.drain(Some(0)).is_empty());
        assert!(s.drain(None).is_empty());
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut s = store();
        s.store(0, val(1));
        s.store(3, val(2));
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.required_filled(), 0);
    }
}
