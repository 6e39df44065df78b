//! Runtime-declared record schemas.

use serde_yaml::{Mapping, Value};
use std::fmt;

use crate::error::{Error, Result};
use crate::keypath;
use crate::schema::{value_kind, Schema, SchemaKind};

/// The kind of value a record field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// `true` / `false`.
    Bool,
    /// A whole number.
    Integer,
    /// Any number; integers are accepted.
    Float,
    /// A string.
    String,
    /// A sequence of arbitrary values.
    List,
    /// A free-form mapping; its keys are not checked.
    Map,
    /// Anything.
    Any,
    /// A nested record with its own declared fields.
    Record(RecordSchema),
}

impl FieldKind {
    fn check(&self, value: &Value, path: &str) -> Result<()> {
        let matches = match (self, value) {
            (Self::Any, _)
            | (Self::Bool, Value::Bool(_))
            | (Self::Float, Value::Number(_))
            | (Self::String, Value::String(_))
            | (Self::List, Value::Sequence(_))
            | (Self::Map, Value::Mapping(_)) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Record(record), Value::Mapping(nested)) => {
                return record.check(nested, path);
            }
            _ => false,
        };

        if matches {
            Ok(())
        } else {
            Err(Error::validation(
                path,
                format!("expected {self}, found {}", value_kind(value)),
            ))
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::List => write!(f, "sequence"),
            Self::Map | Self::Record(_) => write!(f, "mapping"),
            Self::Any => write!(f, "any value"),
        }
    }
}

/// A declared field of a [`RecordSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    default: Option<Value>,
    description: Option<String>,
}

impl Field {
    /// A field with a default value.
    pub fn new(name: impl Into<String>, kind: FieldKind, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            default: Some(default.into()),
            description: None,
        }
    }

    /// A field with no default; configuration is invalid until some layer
    /// provides it.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            description: None,
        }
    }

    /// A nested record; its default is the record's own defaults.
    pub fn record(name: impl Into<String>, schema: RecordSchema) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Record(schema),
            default: None,
            description: None,
        }
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field kind.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn is_required(&self) -> bool {
        self.default.is_none() && !matches!(self.kind, FieldKind::Record(_))
    }
}

/// A schema whose fields are declared at runtime.
///
/// Explicit `null` is accepted for every field, so a config file can always
/// clear a value. Required fields are only checked on the fully merged
/// configuration, since any single layer may leave them to another. Keys
/// that are not declared are accepted here; strict mode rejects them one
/// level up.
///
/// # Examples
///
/// ```
/// use conftier::schema::{Field, FieldKind, RecordSchema, Schema};
///
/// let schema = RecordSchema::new()
///     .field(Field::new("name", FieldKind::String, "app"))
///     .field(Field::record(
///         "server",
///         RecordSchema::new().field(Field::new("port", FieldKind::Integer, 8080)),
///     ));
///
/// let defaults = schema.defaults().unwrap();
/// assert_eq!(serde_yaml::to_string(&defaults).unwrap(), "name: app\nserver:\n  port: 8080\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSchema {
    fields: Vec<Field>,
}

impl RecordSchema {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any earlier field with the same name.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.retain(|existing| existing.name != field.name);
        self.fields.push(field);
        self
    }

    /// The declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn check(&self, values: &Mapping, prefix: &str) -> Result<()> {
        for field in &self.fields {
            let path = keypath::join(prefix, &field.name);
            match values.get(field.name.as_str()) {
                None | Some(Value::Null) => {}
                Some(value) => field.kind.check(value, &path)?,
            }
        }
        Ok(())
    }

    fn check_present(&self, values: &Mapping, prefix: &str) -> Result<()> {
        for field in &self.fields {
            let path = keypath::join(prefix, &field.name);
            match (values.get(field.name.as_str()), &field.kind) {
                (None, _) if field.is_required() => {
                    return Err(Error::validation(path, "required field is missing"));
                }
                (Some(Value::Mapping(nested)), FieldKind::Record(record)) => {
                    record.check_present(nested, &path)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Schema for RecordSchema {
    type Config = Mapping;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Record
    }

    fn defaults(&self) -> Result<Mapping> {
        let mut defaults = Mapping::new();
        for field in &self.fields {
            let value = match (&field.kind, &field.default) {
                (_, Some(default)) => default.clone(),
                (FieldKind::Record(record), None) => Value::Mapping(record.defaults()?),
                (_, None) => continue,
            };
            defaults.insert(Value::from(field.name.as_str()), value);
        }
        Ok(defaults)
    }

    fn declared_fields(&self) -> Result<Mapping> {
        let mut declared = Mapping::new();
        for field in &self.fields {
            let shape = match &field.kind {
                FieldKind::Record(record) => Value::Mapping(record.declared_fields()?),
                FieldKind::Map => Value::Mapping(Mapping::new()),
                _ => Value::Null,
            };
            declared.insert(Value::from(field.name.as_str()), shape);
        }
        Ok(declared)
    }

    fn construct(&self, values: &Mapping) -> Result<Mapping> {
        self.check(values, "")?;
        Ok(values.clone())
    }

    fn check_required(&self, values: &Mapping) -> Result<()> {
        self.check_present(values, "")
    }

    fn serialize(&self, config: &Mapping) -> Result<Mapping> {
        Ok(config.clone())
    }
}
