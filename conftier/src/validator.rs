//! Configuration validation beyond what a schema's types enforce.
//!
//! Two checks live here: strict-mode detection of keys the schema does not
//! declare, and caller-supplied validation hooks run against the merged
//! configuration.

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::keypath;

/// A caller-supplied check run against the merged configuration mapping.
///
/// Hooks report failures with [`Error::validation`] so the error names the
/// offending field.
pub type ValidationHook = Box<dyn Fn(&Mapping) -> Result<()>>;

/// Validates configuration mappings.
///
/// # Examples
///
/// ```
/// use conftier::ConfigValidator;
/// use serde_yaml::Mapping;
///
/// let declared: Mapping = serde_yaml::from_str("name: null\n").unwrap();
/// let values: Mapping = serde_yaml::from_str("nmae: typo\n").unwrap();
///
/// let err = ConfigValidator::check_unknown_fields(&declared, &values).unwrap_err();
/// assert_eq!(err.field(), Some("nmae"));
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Reject keys in `values` that `declared` does not list.
    ///
    /// Descends into nested mappings while the declaration is itself a
    /// non-empty mapping. An empty mapping or a non-mapping declaration
    /// leaves that subtree open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] with the dotted path of the first
    /// unknown key.
    pub fn check_unknown_fields(declared: &Mapping, values: &Mapping) -> Result<()> {
        Self::check_unknown_at(declared, values, "")
    }

    fn check_unknown_at(declared: &Mapping, values: &Mapping, prefix: &str) -> Result<()> {
        for (key, value) in values {
            let path = keypath::join(prefix, &keypath::key_name(key));
            let Some(shape) = declared.get(key) else {
                return Err(Error::validation(path, "unknown field (strict mode)"));
            };

            if let (Value::Mapping(nested_declared), Value::Mapping(nested_values)) = (shape, value)
            {
                if !nested_declared.is_empty() {
                    Self::check_unknown_at(nested_declared, nested_values, &path)?;
                }
            }
        }
        Ok(())
    }

    /// Run every hook in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error a hook reports.
    pub fn run_hooks(hooks: &[ValidationHook], values: &Mapping) -> Result<()> {
        for hook in hooks {
            hook(values)?;
        }
        Ok(())
    }
}
