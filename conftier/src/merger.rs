//! Configuration merging and precedence handling.
//!
//! Sources are applied lowest precedence first: schema defaults, then the
//! user file, then the project file. A key that a source omits never
//! overrides; a key a source sets to `null` does.

use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::model::ConfigModel;
use crate::schema::Schema;

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use conftier::ConfigMerger;
/// use serde_yaml::Mapping;
///
/// let base: Mapping = serde_yaml::from_str("a:\n  b: 1\n  c: 2\n").unwrap();
/// let patch: Mapping = serde_yaml::from_str("a:\n  b: 10\n").unwrap();
///
/// let merged = ConfigMerger::deep_update(&base, &patch);
/// assert_eq!(serde_yaml::to_string(&merged).unwrap(), "a:\n  b: 10\n  c: 2\n");
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge the default, user and project layers into the effective model.
    ///
    /// Equivalent to `default.merge(user).merge(project)`, skipping absent
    /// layers. The result is validated against the schema (and, when the
    /// default model is strict, checked for unknown fields) as part of each
    /// merge step; required fields are checked once on the final result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaValidation`] naming the offending field
    /// if the merged configuration does not satisfy the schema.
    pub fn merge_configs<S: Schema>(
        default: &ConfigModel<S>,
        user: Option<&ConfigModel<S>>,
        project: Option<&ConfigModel<S>>,
    ) -> Result<ConfigModel<S>> {
        let mut result = default.clone();

        if let Some(user) = user {
            log::debug!("applying user layer ({} keys)", user.overrides().len());
            result = result.merge(user)?;
        }

        if let Some(project) = project {
            log::debug!("applying project layer ({} keys)", project.overrides().len());
            result = result.merge(project)?;
        }

        result.schema().check_required(result.values())?;
        Ok(result)
    }

    /// Merge plain mappings layer by layer, without a schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use conftier::ConfigMerger;
    /// use serde_yaml::Mapping;
    ///
    /// let defaults: Mapping = serde_yaml::from_str("x: default\ny: 1\n").unwrap();
    /// let project: Mapping = serde_yaml::from_str("x: null\n").unwrap();
    ///
    /// let merged = ConfigMerger::merge_mappings(&defaults, None, Some(&project));
    /// assert!(merged.get("x").unwrap().is_null());
    /// assert_eq!(merged.get("y").unwrap().as_i64(), Some(1));
    /// ```
    #[must_use]
    pub fn merge_mappings(
        default: &Mapping,
        user: Option<&Mapping>,
        project: Option<&Mapping>,
    ) -> Mapping {
        let mut result = default.clone();
        for layer in [user, project].into_iter().flatten() {
            Self::deep_update_in_place(&mut result, layer);
        }
        result
    }

    /// Return a copy of `base` with `patch` deep-merged on top.
    #[must_use]
    pub fn deep_update(base: &Mapping, patch: &Mapping) -> Mapping {
        let mut result = base.clone();
        Self::deep_update_in_place(&mut result, patch);
        result
    }

    /// Deep-merge `patch` into `target`.
    ///
    /// # Merging Rules
    ///
    /// - Keys absent from `patch`: untouched
    /// - Both sides mappings: merged key by key, recursively
    /// - Anything else (scalars, sequences, `null`): replaced wholesale
    pub fn deep_update_in_place(target: &mut Mapping, patch: &Mapping) {
        for (key, value) in patch {
            if let (Some(Value::Mapping(existing)), Value::Mapping(nested)) =
                (target.get_mut(key), value)
            {
                Self::deep_update_in_place(existing, nested);
                continue;
            }
            target.insert(key.clone(), value.clone());
        }
    }
}
