//! Tag-driven configuration loader.
//!
//! Fills a nested configuration structure from a flat environment:
//!
//! 1. Capture an [`Environment`] snapshot
//! 2. Walk the structure's fields in declaration order, recursing into
//!    nested structures under their namespace fragment
//! 3. Resolve every leaf from its underscore-joined key, its default, or
//!    nothing at all
//! 4. Coerce the raw string into the field's declared type
//!
//! The first error aborts the load. Fields assigned before the failing one
//! keep their new values.
//!
//! # Key Derivation
//!
//! A leaf tagged `env = "c1"` inside a structure reached through namespaces
//! `b` then `c` is read from `b_c_c1`. Keys are used verbatim, no case
//! conversion is applied.

mod coerce;
mod schema;
mod snapshot;

pub use coerce::{CoercionError, Kind, Parsed, Scalar};
pub use schema::{EnvField, Field, Node, ScalarSlot, SequenceSlot, Tags};
pub use snapshot::Environment;

use std::any::type_name;

use crate::error::ConfigError;

/// Load `target` from the current process environment.
///
/// # Errors
///
/// See [`parse_with`].
pub fn parse<T: EnvField + ?Sized>(target: &mut T) -> Result<(), ConfigError> {
    let env = Environment::from_process();
    parse_with(&env, target)
}

/// Load `target` from an explicit environment snapshot.
///
/// # Errors
///
/// - `NotStructPointer`: `target` is not a structure
/// - `NamespaceTagNotFound`: a nested structure field has no namespace
/// - `ValueRequired`: a required field resolved to an empty value
/// - `InvalidType`: a field's type is unsupported or its value failed to parse
/// - `Element`: an element of a sequence field failed to parse
pub fn parse_with<T: EnvField + ?Sized>(
    env: &Environment,
    target: &mut T,
) -> Result<(), ConfigError> {
    match target.node() {
        Node::Struct(fields) => walk(env, fields, &[]),
        _ => Err(ConfigError::NotStructPointer {
            type_name: type_name::<T>(),
        }),
    }
}

fn walk(
    env: &Environment,
    fields: Vec<Field<'_>>,
    prefix: &[&'static str],
) -> Result<(), ConfigError> {
    for field in fields {
        let Field {
            name,
            type_name,
            tags,
            value,
        } = field;

        match value.node() {
            Node::Struct(children) => {
                let namespace = tags
                    .namespace
                    .filter(|ns| !ns.is_empty())
                    .ok_or(ConfigError::NamespaceTagNotFound { field: name })?;

                let mut nested = prefix.to_vec();
                nested.push(namespace);
                tracing::trace!(
                    field = name,
                    namespace = %nested.join("_"),
                    "entering namespace"
                );

                walk(env, children, &nested)?;
            }
            leaf => resolve(env, name, type_name, &tags, leaf, prefix)?,
        }
    }

    Ok(())
}

fn resolve(
    env: &Environment,
    name: &'static str,
    type_name: &'static str,
    tags: &Tags,
    leaf: Node<'_>,
    prefix: &[&'static str],
) -> Result<(), ConfigError> {
    let key = tags
        .env
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| join_key(prefix, fragment));

    // An empty environment value counts as unset and falls through to the default
    let from_env = key
        .as_deref()
        .and_then(|k| env.get(k))
        .filter(|v| !v.is_empty());
    let raw = match from_env {
        Some(value) => {
            tracing::debug!(
                field = name,
                key = key.as_deref(),
                source = "environment",
                "resolved configuration value"
            );
            value
        }
        None => {
            let value = tags.default.unwrap_or("");
            tracing::debug!(
                field = name,
                key = key.as_deref(),
                source = "default",
                "resolved configuration value"
            );
            value
        }
    };

    let label = || key.clone().unwrap_or_else(|| name.to_owned());
    let invalid = || ConfigError::InvalidType {
        field: name,
        type_name,
    };

    if tags.required && raw.is_empty() {
        return Err(ConfigError::ValueRequired { key: label() });
    }

    match leaf {
        Node::Scalar(slot) => {
            // The parser's own error is dropped for scalar fields
            let parsed = slot.kind().parse(raw).map_err(|_| invalid())?;
            if !slot.set(parsed) {
                return Err(invalid());
            }
        }
        Node::Sequence(slot) => {
            if raw.is_empty() {
                slot.replace(Vec::new());
                return Ok(());
            }

            let kind = slot.element_kind().ok_or_else(invalid)?;
            let values = raw
                .split(',')
                .map(|part| {
                    kind.parse(part.trim()).map_err(|source| ConfigError::Element {
                        key: label(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if !slot.replace(values) {
                return Err(invalid());
            }
        }
        Node::Struct(_) | Node::Unsupported => return Err(invalid()),
    }

    Ok(())
}

fn join_key(prefix: &[&str], fragment: &str) -> String {
    let mut parts = prefix.to_vec();
    parts.push(fragment);
    parts.join("_")
}
