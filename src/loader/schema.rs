//! Configuration schema.
//!
//! Every loadable type describes itself through [`EnvField::node`]: a
//! structure lists its fields together with their tags, a leaf exposes a
//! slot the resolver can assign into. The walker only ever sees this tree,
//! so it works for any structure shape without runtime reflection.
//!
//! Structures are normally declared with [`crate::env_config!`], which
//! generates the struct and its schema from per-field tags.

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};

use super::coerce::{Kind, Parsed, Scalar};

/// A type that can be filled by the loader.
pub trait EnvField {
    /// Describe this value for the walker.
    fn node(&mut self) -> Node<'_>;
}

/// Shape of a loadable value.
pub enum Node<'a> {
    /// A structure, with its fields in declaration order.
    Struct(Vec<Field<'a>>),
    /// A leaf with a parser in the coercion table.
    Scalar(&'a mut dyn ScalarSlot),
    /// A homogeneous sequence, read from a comma-separated value.
    Sequence(&'a mut dyn SequenceSlot),
    /// A leaf the loader cannot fill (options, boxes, maps).
    Unsupported,
}

/// Tags declared on a structure field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags {
    /// Key fragment of a leaf. Without it the field only takes its default.
    pub env: Option<&'static str>,
    /// Key prefix fragment of a nested structure.
    pub namespace: Option<&'static str>,
    pub required: bool,
    /// Raw value used when the environment has none.
    pub default: Option<&'static str>,
}

/// One field of a structure: its name, tags and a borrow of its value.
pub struct Field<'a> {
    pub name: &'static str,
    pub type_name: &'static str,
    pub tags: Tags,
    pub value: &'a mut dyn EnvField,
}

impl<'a> Field<'a> {
    pub fn new<T: EnvField>(name: &'static str, value: &'a mut T) -> Self {
        Self {
            name,
            type_name: type_name::<T>(),
            tags: Tags::default(),
            value,
        }
    }

    pub fn env(mut self, fragment: &'static str) -> Self {
        self.tags.env = Some(fragment);
        self
    }

    pub fn namespace(mut self, fragment: &'static str) -> Self {
        self.tags.namespace = Some(fragment);
        self
    }

    pub fn required(mut self) -> Self {
        self.tags.required = true;
        self
    }

    pub fn default_value(mut self, raw: &'static str) -> Self {
        self.tags.default = Some(raw);
        self
    }
}

/// Assignment target of a scalar leaf.
pub trait ScalarSlot {
    fn kind(&self) -> Kind;

    /// Store `value`, converted to the slot's declared type.
    ///
    /// Returns `false` and leaves the slot untouched when `value` is of
    /// another kind.
    fn set(&mut self, value: Parsed) -> bool;
}

impl<T: Scalar> ScalarSlot for T {
    fn kind(&self) -> Kind {
        T::KIND
    }

    fn set(&mut self, value: Parsed) -> bool {
        match T::from_parsed(value) {
            Some(converted) => {
                *self = converted;
                true
            }
            None => false,
        }
    }
}

/// Assignment target of a sequence leaf.
pub trait SequenceSlot {
    /// Kind of the elements, or `None` when they have no parser.
    fn element_kind(&self) -> Option<Kind>;

    /// Replace the whole sequence with `values`, in order.
    ///
    /// Returns `false` and leaves the sequence untouched when any value
    /// cannot be converted to the element type.
    fn replace(&mut self, values: Vec<Parsed>) -> bool;
}

impl<T: EnvField + Default> SequenceSlot for Vec<T> {
    fn element_kind(&self) -> Option<Kind> {
        let mut probe = T::default();
        let kind = match probe.node() {
            Node::Scalar(slot) => Some(slot.kind()),
            _ => None,
        };
        kind
    }

    fn replace(&mut self, values: Vec<Parsed>) -> bool {
        let mut items = Vec::with_capacity(values.len());
        for value in values {
            let mut item = T::default();
            let assigned = match item.node() {
                Node::Scalar(slot) => slot.set(value),
                _ => false,
            };
            if !assigned {
                return false;
            }
            items.push(item);
        }
        *self = items;
        true
    }
}

macro_rules! scalar_fields {
    ($($ty:ty),* $(,)?) => {$(
        impl EnvField for $ty {
            fn node(&mut self) -> Node<'_> {
                Node::Scalar(self)
            }
        }
    )*};
}

scalar_fields!(bool, String, isize, i8, i16, i32, i64, usize, u8, u16, u32, u64, f32, f64);

impl<T: EnvField + Default> EnvField for Vec<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Sequence(self)
    }
}

impl<T> EnvField for Option<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Unsupported
    }
}

impl<T: ?Sized> EnvField for Box<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Unsupported
    }
}

impl<K, V, S> EnvField for HashMap<K, V, S> {
    fn node(&mut self) -> Node<'_> {
        Node::Unsupported
    }
}

impl<K, V> EnvField for BTreeMap<K, V> {
    fn node(&mut self) -> Node<'_> {
        Node::Unsupported
    }
}

/// Declare a configuration structure and its schema.
///
/// Each field is followed by its tags in brackets:
///
/// - `env = "fragment"`: key fragment of a leaf
/// - `namespace = "fragment"`: key prefix of a nested structure (mandatory
///   for nested structures)
/// - `required`: the resolved value must not be empty
/// - `default = "raw"`: raw value used when the environment has none
///
/// ```
/// use task_todo_api::env_config;
///
/// env_config! {
///     #[derive(Debug, Default)]
///     pub struct Database {
///         pub uri: String [env = "URI", required],
///         pub pool: u32 [env = "POOL", default = "10"],
///     }
/// }
///
/// env_config! {
///     #[derive(Debug, Default)]
///     pub struct Settings {
///         pub database: Database [namespace = "DB"],
///         pub hosts: Vec<String> [env = "HOSTS"],
///     }
/// }
/// ```
///
/// With these declarations `Settings.database.uri` is read from `DB_URI`.
#[macro_export]
macro_rules! env_config {
    (@tags $field:expr ;) => {
        $field
    };
    (@tags $field:expr ; env = $fragment:literal $(, $($rest:tt)*)?) => {
        $crate::env_config!(@tags $field.env($fragment) ; $($($rest)*)?)
    };
    (@tags $field:expr ; namespace = $fragment:literal $(, $($rest:tt)*)?) => {
        $crate::env_config!(@tags $field.namespace($fragment) ; $($($rest)*)?)
    };
    (@tags $field:expr ; required $(, $($rest:tt)*)?) => {
        $crate::env_config!(@tags $field.required() ; $($($rest)*)?)
    };
    (@tags $field:expr ; default = $raw:literal $(, $($rest:tt)*)?) => {
        $crate::env_config!(@tags $field.default_value($raw) ; $($($rest)*)?)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty [ $($tag:tt)* ]
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::loader::EnvField for $name {
            fn node(&mut self) -> $crate::loader::Node<'_> {
                $crate::loader::Node::Struct(vec![
                    $(
                        $crate::env_config!(
                            @tags $crate::loader::Field::new(stringify!($field), &mut self.$field) ;
                            $($tag)*
                        )
                    ),*
                ])
            }
        }
    };
}

/// Make a single-field tuple struct loadable as its inner scalar.
///
/// ```
/// use task_todo_api::scalar_newtype;
///
/// #[derive(Debug, Default, PartialEq)]
/// pub struct Port(u16);
///
/// scalar_newtype!(Port(u16));
/// ```
#[macro_export]
macro_rules! scalar_newtype {
    ($name:ident($inner:ty)) => {
        impl $crate::loader::Scalar for $name {
            const KIND: $crate::loader::Kind = <$inner as $crate::loader::Scalar>::KIND;

            fn from_parsed(value: $crate::loader::Parsed) -> Option<Self> {
                <$inner as $crate::loader::Scalar>::from_parsed(value).map($name)
            }
        }

        impl $crate::loader::EnvField for $name {
            fn node(&mut self) -> $crate::loader::Node<'_> {
                $crate::loader::Node::Scalar(self)
            }
        }
    };
}
