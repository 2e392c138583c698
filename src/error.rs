//! Error types used by the registry and the hub.
//!
//! - [`RegistryError`]: the declared type groups are inconsistent.
//! - [`HubError`]: a strict hub operation named a type the hub does not know.
//!
//! Both provide `as_label` (stable snake_case label for logs) and `as_message`.

use thiserror::Error;

use crate::registry::Group;

/// # Errors produced while building a type registry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The same type was declared twice.
    #[error("type {type_name} already registered as {existing}, cannot add it as {requested}")]
    DuplicateType {
        /// Fully qualified name of the type.
        type_name: &'static str,
        /// Group the type was first registered in.
        existing: Group,
        /// Group of the rejected registration.
        requested: Group,
    },

    /// No required type was declared; the barrier could never open.
    #[error("registry declares no required types")]
    NoRequiredTypes,
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use synchro::RegistryError;
    ///
    /// assert_eq!(RegistryError::NoRequiredTypes.as_label(), "registry_no_required");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::DuplicateType { .. } => "registry_duplicate_type",
            RegistryError::NoRequiredTypes => "registry_no_required",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::DuplicateType {
                type_name,
                existing,
                requested,
            } => format!("duplicate: {type_name} ({existing} vs {requested})"),
            RegistryError::NoRequiredTypes => "no required types".to_string(),
        }
    }
}

/// # Errors produced by strict hub operations.
///
/// The lenient `send`/`subscribe` never fail; `try_send`/`try_subscribe` report
/// unknown types through this enum.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// The type is not part of the hub's registry.
    #[error("type {type_name} is not registered")]
    UnknownType {
        /// Fully qualified name of the type.
        type_name: &'static str,
    },
}

impl HubError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use synchro::HubError;
    ///
    /// let err = HubError::UnknownType { type_name: "u8" };
    /// assert_eq!(err.as_label(), "hub_unknown_type");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::UnknownType { .. } => "hub_unknown_type",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HubError::UnknownType { type_name } => format!("unknown type: {type_name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display() {
        let err = RegistryError::DuplicateType {
            type_name: "u32",
            existing: Group::Required,
            requested: Group::Listed,
        };
        assert_eq!(
            err.to_string(),
            "type u32 already registered as required, cannot add it as listed"
        );
        assert_eq!(err.as_label(), "registry_duplicate_type");
        assert_eq!(err.as_message(), "duplicate: u32 (required vs listed)");
    }

    #[test]
    fn test_unknown_type_message() {
        let err = HubError::UnknownType { type_name: "alloc::string::String" };
        assert_eq!(err.as_message(), "unknown type: alloc::string::String");
        assert_eq!(err.to_string(), "type alloc::string::String is not registered");
    }
}
