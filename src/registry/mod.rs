//! Type registry and delivery groups.

mod group;
mod types;

pub use group::Group;
pub use types::{RegistryBuilder, TypeRegistry};

pub(crate) use types::TypeEntry;
