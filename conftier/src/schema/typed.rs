//! Serde-model schemas.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::keypath;
use crate::schema::{value_kind, Schema, SchemaKind};

/// Field path used when an error cannot be attributed to a single field.
pub(crate) const ROOT_FIELD: &str = "<root>";

/// A schema backed by a serde model type.
///
/// Defaults come from `T::default()`; types are enforced by deserializing
/// the merged mapping into `T`. Fields that should accept an explicit
/// `null` from a config file must be `Option<_>` in `T`.
///
/// # Examples
///
/// ```
/// use conftier::schema::{Schema, TypedSchema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     name: String,
///     workers: u32,
/// }
///
/// let schema = TypedSchema::<AppConfig>::new();
/// let defaults = schema.defaults().unwrap();
/// assert!(defaults.contains_key("workers"));
/// ```
pub struct TypedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    /// Creates a schema for the model type `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedSchema<{}>", std::any::type_name::<T>())
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    type Config = T;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Typed
    }

    fn defaults(&self) -> Result<Mapping> {
        to_mapping(&T::default())
    }

    fn construct(&self, values: &Mapping) -> Result<T> {
        serde_path_to_error::deserialize(Value::Mapping(values.clone())).map_err(|err| {
            let path = err.path().to_string();
            let message = err.into_inner().to_string();
            Error::SchemaValidation {
                field: field_path(&path, &message),
                message,
            }
        })
    }

    fn serialize(&self, config: &T) -> Result<Mapping> {
        to_mapping(config)
    }
}

/// Serialize a value that must come out as a YAML mapping.
fn to_mapping<T: Serialize>(value: &T) -> Result<Mapping> {
    match serde_yaml::to_value(value)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(Error::validation(
            ROOT_FIELD,
            format!("schema must serialize to a mapping, found {}", value_kind(&other)),
        )),
    }
}

/// The dotted field path for a deserialization error at `path`.
///
/// A missing field is reported by serde at its parent struct, so the
/// field's own name is appended from the message.
fn field_path(path: &str, message: &str) -> String {
    let parent = if path == "." { "" } else { path };
    match missing_field(message) {
        Some(name) => keypath::join(parent, name),
        None if parent.is_empty() => ROOT_FIELD.to_string(),
        None => parent.to_string(),
    }
}

/// Extract the field name from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.split("missing field `").nth(1)?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}
