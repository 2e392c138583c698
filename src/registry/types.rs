//! # Type registry: the closed set of event types a hub handles.
//!
//! A [`TypeRegistry`] is declared once, before the hub exists, and never
//! changes afterwards. Each type belongs to exactly one [`Group`]; the order of
//! declaration inside a group is the order the hub flushes that group in.
//!
//! ## Example
//! ```rust
//! use synchro::{Group, TypeRegistry};
//!
//! struct Position;
//! struct Speed;
//! struct Alarm;
//!
//! let registry = TypeRegistry::builder()
//!     .required::<Position>()
//!     .optional::<Speed>()
//!     .listed::<Alarm>()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.group_of::<Position>(), Some(Group::Required));
//! assert_eq!(registry.group_of::<u8>(), None);
//! assert_eq!(registry.len(), 3);
//! ```

use std::any::TypeId;
use std::collections::HashMap;

use crate::channel::{Channel, ErasedChannel};
use crate::error::RegistryError;

use super::Group;

/// Registration record of one type.
#[derive(Clone, Debug)]
pub(crate) struct TypeEntry {
    pub(crate) type_name: &'static str,
    pub(crate) group: Group,
    pub(crate) make_channel: fn() -> Box<dyn ErasedChannel>,
}

fn make_channel<T: Send + Sync + 'static>() -> Box<dyn ErasedChannel> {
    Box::new(Channel::<T>::new())
}

/// Closed set of event types partitioned into required, optional and listed groups.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    index: HashMap<TypeId, usize>,
}

impl TypeRegistry {
    /// Starts a registry declaration.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Group `T` belongs to, or `None` if `T` is not registered.
    #[must_use]
    pub fn group_of<T: 'static>(&self) -> Option<Group> {
        self.position(TypeId::of::<T>())
            .map(|idx| self.entries[idx].group)
    }

    /// True if `T` is registered in any group.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Type names of one group, in declaration order.
    #[must_use]
    pub fn type_names(&self, group: Group) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.group == group)
            .map(|e| e.type_name)
            .collect()
    }

    pub(crate) fn position(&self, id: TypeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }
}

/// Builder for [`TypeRegistry`].
///
/// Declaration errors are collected and reported by [`RegistryBuilder::build`],
/// so the chain itself stays infallible.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<TypeEntry>,
    index: HashMap<TypeId, usize>,
    error: Option<RegistryError>,
}

impl RegistryBuilder {
    /// Declares a required type.
    #[must_use]
    pub fn required<T: Send + Sync + 'static>(self) -> Self {
        self.add::<T>(Group::Required)
    }

    /// Declares an optional type.
    #[must_use]
    pub fn optional<T: Send + Sync + 'static>(self) -> Self {
        self.add::<T>(Group::Optional)
    }

    /// Declares a listed type.
    #[must_use]
    pub fn listed<T: Send + Sync + 'static>(self) -> Self {
        self.add::<T>(Group::Listed)
    }

    /// Declares `T` in `group`.
    #[must_use]
    pub fn add<T: Send + Sync + 'static>(mut self, group: Group) -> Self {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(&idx) = self.index.get(&type_id) {
            if self.error.is_none() {
                self.error = Some(RegistryError::DuplicateType {
                    type_name,
                    existing: self.entries[idx].group,
                    requested: group,
                });
            }
            return self;
        }

        self.index.insert(type_id, self.entries.len());
        self.entries.push(TypeEntry {
            type_name,
            group,
            make_channel: make_channel::<T>,
        });
        self
    }

    /// Validates the declaration.
    ///
    /// # Errors
    /// - [`RegistryError::DuplicateType`] if a type was declared more than once;
    /// - [`RegistryError::NoRequiredTypes`] if the required group is empty.
    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if !self.entries.iter().any(|e| e.group == Group::Required) {
            return Err(RegistryError::NoRequiredTypes);
        }
        Ok(TypeRegistry {
            entries: self.entries,
            index: self.index,
        })
    }
}
