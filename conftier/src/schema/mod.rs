//! Schema adapters.
//!
//! A schema describes which fields a configuration has, their defaults and
//! their nesting. Three representations are supported, each behind the same
//! [`Schema`] capability trait:
//!
//! - [`TypedSchema`]: a serde model (`#[derive(Serialize, Deserialize, Default)]`),
//!   with types enforced by deserialization
//! - [`RecordSchema`]: fields declared at runtime with a kind, a default or a
//!   required marker, and nested records
//! - [`MappingSchema`]: a free-form mapping of defaults with no type enforcement
//!
//! Everything above this module works on the mapping view of a
//! configuration; only [`Schema::construct`] and [`Schema::serialize`] cross
//! into the schema's own representation.

pub mod mapping;
pub mod record;
pub mod typed;

pub use mapping::MappingSchema;
pub use record::{Field, FieldKind, RecordSchema};
pub use typed::TypedSchema;

use serde_yaml::{Mapping, Value};
use std::fmt;

use crate::error::Result;

/// Which representation a schema uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// A serde model type.
    Typed,
    /// A runtime-declared record.
    Record,
    /// A free-form mapping.
    Mapping,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed => write!(f, "typed"),
            Self::Record => write!(f, "record"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

/// Capabilities every schema representation provides.
///
/// # Examples
///
/// ```
/// use conftier::schema::{Schema, SchemaKind, MappingSchema};
///
/// let schema = MappingSchema::from_yaml("name: app\n").unwrap();
/// assert_eq!(schema.kind(), SchemaKind::Mapping);
/// assert_eq!(schema.defaults().unwrap().len(), 1);
/// ```
pub trait Schema {
    /// The schema-typed configuration object handed back to callers.
    type Config: Clone;

    /// Which representation this schema uses.
    fn kind(&self) -> SchemaKind;

    /// Every field that has a default, with that default. Nested schemas
    /// appear as nested mappings.
    ///
    /// # Errors
    ///
    /// Returns an error if the defaults cannot be expressed as a mapping.
    fn defaults(&self) -> Result<Mapping>;

    /// Every declared field, used for strict-mode unknown-field detection.
    ///
    /// Keys are field names. A nested mapping value declares the nested
    /// schema's fields; an empty mapping or any other value marks the field
    /// as open (its contents are not checked).
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration cannot be expressed as a mapping.
    fn declared_fields(&self) -> Result<Mapping> {
        self.defaults()
    }

    /// Build the schema-typed object from a fully populated mapping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaValidation`] naming the offending field
    /// if a value has the wrong type.
    fn construct(&self, values: &Mapping) -> Result<Self::Config>;

    /// Check that a fully merged configuration provides every required
    /// field.
    ///
    /// Run once on the result of merging all layers; a single layer need not
    /// be complete.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaValidation`] naming the first missing
    /// field.
    fn check_required(&self, values: &Mapping) -> Result<()> {
        let _ = values;
        Ok(())
    }

    /// Turn a schema-typed object back into a mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not serialize to a mapping.
    fn serialize(&self, config: &Self::Config) -> Result<Mapping>;
}

/// Short name for the YAML type of a value, used in error messages.
#[must_use]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
