//! Free-form mapping schemas.

use serde_yaml::Mapping;

use crate::error::{Error, Result};
use crate::schema::{value_kind, Schema, SchemaKind};

/// A schema that is nothing more than a mapping of defaults.
///
/// No types are enforced. In strict mode the keys of the defaults are the
/// declared fields.
///
/// # Examples
///
/// ```
/// use conftier::schema::{MappingSchema, Schema};
///
/// let schema = MappingSchema::from_yaml("a:\n  b: 1\n  c: 2\n").unwrap();
/// let defaults = schema.defaults().unwrap();
/// assert!(defaults.contains_key("a"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingSchema {
    defaults: Mapping,
}

impl MappingSchema {
    /// A schema with the given defaults.
    #[must_use]
    pub fn new(defaults: Mapping) -> Self {
        Self { defaults }
    }

    /// A schema with no defaults at all; any mapping is accepted.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse defaults from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not YAML or its top level is not a
    /// mapping.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::empty());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        match value {
            serde_yaml::Value::Mapping(defaults) => Ok(Self { defaults }),
            serde_yaml::Value::Null => Ok(Self::empty()),
            other => Err(Error::validation(
                "<root>",
                format!("schema defaults must be a mapping, found {}", value_kind(&other)),
            )),
        }
    }
}

impl Schema for MappingSchema {
    type Config = Mapping;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Mapping
    }

    fn defaults(&self) -> Result<Mapping> {
        Ok(self.defaults.clone())
    }

    fn construct(&self, values: &Mapping) -> Result<Mapping> {
        Ok(values.clone())
    }

    fn serialize(&self, config: &Mapping) -> Result<Mapping> {
        Ok(config.clone())
    }
}
