//! Error types for configuration loading.
//!
//! The loader reports a small, flat set of failures. The first error found
//! anywhere in the walk aborts the whole load, and fields assigned before the
//! failing one keep their values, so a target that produced an error must be
//! treated as unusable.

use crate::loader::CoercionError;

/// Errors returned by [`crate::loader::parse`] and [`crate::loader::parse_with`].
///
/// # Error Categories
///
/// - **Structural Errors**: the target or one of its nested fields is not
///   shaped the way the loader expects (`NotStructPointer`,
///   `NamespaceTagNotFound`)
/// - **Value Errors**: a field resolved to a value that cannot be used
///   (`ValueRequired`, `InvalidType`, `Element`)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The top-level target is not a structure.
    ///
    /// Raised before any field is inspected.
    #[error("configuration target `{type_name}` is not a structure")]
    NotStructPointer { type_name: &'static str },

    /// A nested structure field does not declare a namespace fragment.
    ///
    /// Raised before any of the nested structure's fields are inspected.
    #[error("nested configuration field `{field}` has no namespace")]
    NamespaceTagNotFound { field: &'static str },

    /// A required field resolved to an empty value.
    ///
    /// `key` is the derived environment key, or the field name when the field
    /// declares no `env` fragment.
    #[error("value required for `{key}`")]
    ValueRequired { key: String },

    /// The field's type cannot be loaded, or its scalar value failed to parse.
    #[error("invalid type for configuration field `{field}` ({type_name})")]
    InvalidType {
        field: &'static str,
        type_name: &'static str,
    },

    /// One element of a comma-separated sequence failed to parse.
    ///
    /// Unlike scalar fields, the element parser's own error is kept.
    #[error("invalid sequence element in `{key}`: {source}")]
    Element {
        key: String,
        #[source]
        source: CoercionError,
    },
}
