//! The unified configuration model.
//!
//! A [`ConfigModel`] holds one configuration layer, or the result of merging
//! several, independently of how its schema is represented. It keeps three
//! views in step:
//!
//! - the fully populated value mapping (defaults plus overrides)
//! - the overrides alone, i.e. the keys its source explicitly set
//! - the schema-typed object built from the values
//!
//! Merging reads the overrides of the higher-precedence model, so a key a
//! config file never mentions cannot clobber a lower layer with a default.

use serde_yaml::{Mapping, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::keypath;
use crate::merger::ConfigMerger;
use crate::schema::{Schema, SchemaKind};
use crate::validator::ConfigValidator;

/// Whether keys the schema does not declare are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Unknown keys are kept and passed through.
    #[default]
    Lenient,
    /// Unknown keys are rejected with a validation error.
    Strict,
}

impl Strictness {
    /// `Strict` when `strict` is true, `Lenient` otherwise.
    #[must_use]
    pub fn from_flag(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// A configuration instance bound to its schema.
///
/// # Examples
///
/// ```
/// use conftier::{ConfigModel, MappingSchema};
/// use serde_yaml::Mapping;
/// use std::sync::Arc;
///
/// let schema = Arc::new(MappingSchema::from_yaml("a:\n  b: 1\n  c: 2\n").unwrap());
/// let user: Mapping = serde_yaml::from_str("a:\n  b: 10\n").unwrap();
///
/// let defaults = ConfigModel::from_schema(Arc::clone(&schema), None).unwrap();
/// let user = ConfigModel::from_schema(schema, Some(&user)).unwrap();
/// let merged = defaults.merge(&user).unwrap();
///
/// assert_eq!(merged.get_value("a.b").unwrap().as_i64(), Some(10));
/// assert_eq!(merged.get_value("a.c").unwrap().as_i64(), Some(2));
/// ```
pub struct ConfigModel<S: Schema> {
    schema: Arc<S>,
    strictness: Strictness,
    values: Mapping,
    overrides: Mapping,
    config: S::Config,
}

impl<S: Schema> ConfigModel<S> {
    /// Build a lenient model from schema defaults, optionally overridden.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaValidation`] if the overrides contain a
    /// value the schema rejects.
    pub fn from_schema(schema: Arc<S>, overrides: Option<&Mapping>) -> Result<Self> {
        Self::from_schema_with(schema, overrides, Strictness::Lenient)
    }

    /// Build a model from schema defaults with an explicit strictness.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaValidation`] if the overrides contain a
    /// value the schema rejects or, in strict mode, a key the schema does
    /// not declare.
    pub fn from_schema_with(
        schema: Arc<S>,
        overrides: Option<&Mapping>,
        strictness: Strictness,
    ) -> Result<Self> {
        let overrides = overrides.cloned().unwrap_or_default();
        if strictness == Strictness::Strict {
            ConfigValidator::check_unknown_fields(&schema.declared_fields()?, &overrides)?;
        }
        let values = ConfigMerger::deep_update(&schema.defaults()?, &overrides);
        Self::assemble(schema, strictness, values, overrides)
    }

    fn assemble(
        schema: Arc<S>,
        strictness: Strictness,
        values: Mapping,
        overrides: Mapping,
    ) -> Result<Self> {
        let config = schema.construct(&values)?;
        Ok(Self {
            schema,
            strictness,
            values,
            overrides,
            config,
        })
    }

    /// The value at a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::KeyNotFound`] if any segment is missing.
    pub fn get_value(&self, path: &str) -> Result<&Value> {
        keypath::lookup(&self.values, path)
    }

    /// Deep-merge `patch` into this model in place.
    ///
    /// Only keys present in `patch` change. The patch is validated before it
    /// is applied; on error the model is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaValidation`] if the patched
    /// configuration does not satisfy the schema.
    pub fn update(&mut self, patch: &Mapping) -> Result<()> {
        if self.strictness == Strictness::Strict {
            ConfigValidator::check_unknown_fields(&self.schema.declared_fields()?, patch)?;
        }
        let values = ConfigMerger::deep_update(&self.values, patch);
        let overrides = ConfigMerger::deep_update(&self.overrides, patch);
        *self = Self::assemble(Arc::clone(&self.schema), self.strictness, values, overrides)?;
        Ok(())
    }

    /// A new model in which every key `other` explicitly sets overrides
    /// this model's value.
    ///
    /// Neither input changes. The result keeps this model's schema and
    /// strictness.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaValidation`] if the merged
    /// configuration does not satisfy the schema.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        if self.strictness == Strictness::Strict {
            ConfigValidator::check_unknown_fields(
                &self.schema.declared_fields()?,
                &other.overrides,
            )?;
        }
        let values = ConfigMerger::deep_update(&self.values, &other.overrides);
        let overrides = ConfigMerger::deep_update(&self.overrides, &other.overrides);
        Self::assemble(Arc::clone(&self.schema), self.strictness, values, overrides)
    }

    /// The configuration as a plain nested mapping.
    #[must_use]
    pub fn to_dict(&self) -> Mapping {
        self.values.clone()
    }

    /// Borrow the fully populated values.
    #[must_use]
    pub fn values(&self) -> &Mapping {
        &self.values
    }

    /// The keys this model's source explicitly set.
    #[must_use]
    pub fn overrides(&self) -> &Mapping {
        &self.overrides
    }

    /// The schema-typed configuration object.
    #[must_use]
    pub fn model(&self) -> &S::Config {
        &self.config
    }

    /// Consume the model, returning the schema-typed object.
    #[must_use]
    pub fn into_config(self) -> S::Config {
        self.config
    }

    /// The schema this model was built from.
    #[must_use]
    pub fn schema(&self) -> &Arc<S> {
        &self.schema
    }

    /// Which schema representation backs this model.
    #[must_use]
    pub fn schema_kind(&self) -> SchemaKind {
        self.schema.kind()
    }

    /// Whether unknown keys are rejected.
    #[must_use]
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }
}

impl<S: Schema> Clone for ConfigModel<S> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            strictness: self.strictness,
            values: self.values.clone(),
            overrides: self.overrides.clone(),
            config: self.config.clone(),
        }
    }
}

/// Models are equal when their populated values are equal.
impl<S: Schema> PartialEq for ConfigModel<S> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<S: Schema> fmt::Debug for ConfigModel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigModel")
            .field("kind", &self.schema.kind())
            .field("strictness", &self.strictness)
            .field("values", &self.values)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldKind, MappingSchema, RecordSchema, TypedSchema};
    use serde::{Deserialize, Serialize};

    fn yaml(text: &str) -> Mapping {
        serde_yaml::from_str(text).unwrap()
    }

    fn mapping_schema(text: &str) -> Arc<MappingSchema> {
        Arc::new(MappingSchema::from_yaml(text).unwrap())
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Limits {
        max_connections: u32,
        timeout_secs: u64,
    }

    impl Default for Limits {
        fn default() -> Self {
            Self {
                max_connections: 100,
                timeout_secs: 30,
            }
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct ServiceConfig {
        name: Option<String>,
        limits: Limits,
    }

    #[test]
    fn test_from_schema_defaults_only() {
        let model = ConfigModel::from_schema(mapping_schema("a:\n  b: 1\n  c: 2\n"), None).unwrap();
        assert_eq!(model.to_dict(), yaml("a:\n  b: 1\n  c: 2\n"));
        assert!(model.overrides().is_empty());
    }

    #[test]
    fn test_from_schema_with_overrides() {
        let model = ConfigModel::from_schema(
            mapping_schema("a:\n  b: 1\n  c: 2\n"),
            Some(&yaml("a:\n  b: 10\n")),
        )
        .unwrap();
        assert_eq!(model.to_dict(), yaml("a:\n  b: 10\n  c: 2\n"));
        assert_eq!(model.overrides(), &yaml("a:\n  b: 10\n"));
    }

    #[test]
    fn test_from_schema_typed() {
        let schema = Arc::new(TypedSchema::<ServiceConfig>::new());
        let model = ConfigModel::from_schema(
            schema,
            Some(&yaml("limits:\n  max_connections: 5\n")),
        )
        .unwrap();
        assert_eq!(model.model().limits.max_connections, 5);
        assert_eq!(model.model().limits.timeout_secs, 30);
        assert_eq!(model.schema_kind(), SchemaKind::Typed);
    }

    #[test]
    fn test_from_schema_typed_rejects_incompatible_value() {
        let schema = Arc::new(TypedSchema::<ServiceConfig>::new());
        let err = ConfigModel::from_schema(
            schema,
            Some(&yaml("limits:\n  timeout_secs: soon\n")),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("limits.timeout_secs"));
    }

    #[test]
    fn test_strict_rejects_unknown_key() {
        let err = ConfigModel::from_schema_with(
            mapping_schema("x: v\n"),
            Some(&yaml("unknown_field: 1\n")),
            Strictness::Strict,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("unknown_field"));
    }

    #[test]
    fn test_lenient_keeps_unknown_key() {
        let model =
            ConfigModel::from_schema(mapping_schema("x: v\n"), Some(&yaml("extra: 1\n"))).unwrap();
        assert_eq!(model.get_value("extra").unwrap(), &Value::from(1));
    }

    #[test]
    fn test_get_value_missing() {
        let model = ConfigModel::from_schema(mapping_schema("a:\n  b: 1\n"), None).unwrap();
        assert!(model.get_value("a.z").unwrap_err().is_key_not_found());
        assert!(model.get_value("q.r").unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_update_touches_only_given_keys() {
        let mut model = ConfigModel::from_schema(
            mapping_schema("a:\n  b: 1\n  c: 2\nd: [1, 2]\n"),
            None,
        )
        .unwrap();
        model.update(&yaml("a:\n  c: 3\nd: [9]\n")).unwrap();
        assert_eq!(model.to_dict(), yaml("a:\n  b: 1\n  c: 3\nd: [9]\n"));
        assert_eq!(model.overrides(), &yaml("a:\n  c: 3\nd: [9]\n"));
    }

    #[test]
    fn test_failed_update_leaves_model_unchanged() {
        let record = RecordSchema::new().field(Field::new("port", FieldKind::Integer, 80));
        let mut model = ConfigModel::from_schema(Arc::new(record), None).unwrap();
        let before = model.clone();

        assert!(model.update(&yaml("port: eighty\n")).is_err());
        assert_eq!(model, before);
    }

    #[test]
    fn test_strict_update_rejects_unknown_key() {
        let mut model =
            ConfigModel::from_schema_with(mapping_schema("x: 1\n"), None, Strictness::Strict)
                .unwrap();
        assert!(model.update(&yaml("y: 2\n")).is_err());
        assert_eq!(model.to_dict(), yaml("x: 1\n"));
    }

    #[test]
    fn test_merge_is_pure() {
        let schema = mapping_schema("a: 1\nb: 2\n");
        let base = ConfigModel::from_schema(Arc::clone(&schema), None).unwrap();
        let other = ConfigModel::from_schema(schema, Some(&yaml("b: 3\n"))).unwrap();

        let merged = base.merge(&other).unwrap();
        assert_eq!(merged.to_dict(), yaml("a: 1\nb: 3\n"));
        assert_eq!(base.to_dict(), yaml("a: 1\nb: 2\n"));
        assert_eq!(other.overrides(), &yaml("b: 3\n"));
    }

    #[test]
    fn test_merge_ignores_other_defaults() {
        let schema = mapping_schema("a: 1\nb: 2\n");
        let user = ConfigModel::from_schema(Arc::clone(&schema), Some(&yaml("a: 5\n"))).unwrap();
        let project = ConfigModel::from_schema(schema, Some(&yaml("b: 6\n"))).unwrap();

        let merged = user.merge(&project).unwrap();
        assert_eq!(merged.to_dict(), yaml("a: 5\nb: 6\n"));
    }

    #[test]
    fn test_merge_explicit_null_overrides() {
        let schema = mapping_schema("x: v\n");
        let base = ConfigModel::from_schema(Arc::clone(&schema), None).unwrap();
        let other = ConfigModel::from_schema(schema, Some(&yaml("x: null\n"))).unwrap();
        assert!(base.merge(&other).unwrap().get_value("x").unwrap().is_null());
    }

    #[test]
    fn test_merge_idempotent() {
        let schema = mapping_schema("a:\n  b: 1\n  c: 2\n");
        let base = ConfigModel::from_schema(Arc::clone(&schema), None).unwrap();
        let patch = ConfigModel::from_schema(schema, Some(&yaml("a:\n  b: 7\n"))).unwrap();

        let once = base.merge(&patch).unwrap();
        let twice = once.merge(&patch).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_round_trip_through_dict() {
        let schema = Arc::new(TypedSchema::<ServiceConfig>::new());
        let model = ConfigModel::from_schema(
            Arc::clone(&schema),
            Some(&yaml("name: api\nlimits:\n  timeout_secs: 5\n")),
        )
        .unwrap();

        let rebuilt = ConfigModel::from_schema(schema, Some(&model.to_dict())).unwrap();
        assert_eq!(rebuilt, model);
        assert_eq!(rebuilt.model(), model.model());
    }

    #[test]
    fn test_into_config() {
        let schema = Arc::new(TypedSchema::<ServiceConfig>::new());
        let model = ConfigModel::from_schema(schema, Some(&yaml("name: api\n"))).unwrap();
        assert_eq!(model.into_config().name.as_deref(), Some("api"));
    }

    #[test]
    fn test_strictness_from_flag() {
        assert_eq!(Strictness::from_flag(true), Strictness::Strict);
        assert_eq!(Strictness::from_flag(false), Strictness::Lenient);
    }
}
