//! Property-based tests for merging.

use std::sync::Arc;

use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

use crate::merger::ConfigMerger;
use crate::model::ConfigModel;
use crate::schema::MappingSchema;

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
        prop::collection::vec((0i64..10).prop_map(Value::from), 0..3).prop_map(Value::Sequence),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map("[a-d]", inner, 0..4).prop_map(|entries| {
            Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::from(k), v))
                    .collect(),
            )
        })
    })
}

fn mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map("[a-e]", value_strategy(), 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (Value::from(k), v))
            .collect()
    })
}

/// Every key in `patch` has the patched value in `merged`.
fn patch_wins(merged: &Mapping, patch: &Mapping) -> bool {
    patch.iter().all(|(key, value)| match (merged.get(key), value) {
        (Some(Value::Mapping(merged_nested)), Value::Mapping(patch_nested)) => {
            patch_wins(merged_nested, patch_nested)
        }
        (Some(found), expected) => found == expected,
        (None, _) => false,
    })
}

fn model(schema: &Arc<MappingSchema>, overrides: &Mapping) -> ConfigModel<MappingSchema> {
    ConfigModel::from_schema(Arc::clone(schema), Some(overrides)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn higher_precedence_wins(base in mapping_strategy(), patch in mapping_strategy()) {
        let merged = ConfigMerger::deep_update(&base, &patch);
        prop_assert!(patch_wins(&merged, &patch));
    }

    #[test]
    fn omitted_keys_keep_base(base in mapping_strategy(), patch in mapping_strategy()) {
        let merged = ConfigMerger::deep_update(&base, &patch);
        for (key, value) in &base {
            if !patch.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    #[test]
    fn merge_is_idempotent(base in mapping_strategy(), patch in mapping_strategy()) {
        let once = ConfigMerger::deep_update(&base, &patch);
        let twice = ConfigMerger::deep_update(&once, &patch);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_configs_matches_chained_merge(
        defaults in mapping_strategy(),
        user in mapping_strategy(),
        project in mapping_strategy()
    ) {
        let schema = Arc::new(MappingSchema::new(defaults));
        let default = ConfigModel::from_schema(Arc::clone(&schema), None).unwrap();
        let user = model(&schema, &user);
        let project = model(&schema, &project);

        let layered = ConfigMerger::merge_configs(&default, Some(&user), Some(&project)).unwrap();
        let chained = default.merge(&user).unwrap().merge(&project).unwrap();
        prop_assert_eq!(&layered, &chained);

        let again = layered.merge(&project).unwrap();
        prop_assert_eq!(&again, &layered);
    }

    #[test]
    fn model_round_trips_through_dict(defaults in mapping_strategy(), overrides in mapping_strategy()) {
        let schema = Arc::new(MappingSchema::new(defaults));
        let original = model(&schema, &overrides);
        let rebuilt = model(&schema, &original.to_dict());
        prop_assert_eq!(rebuilt, original);
    }

    #[test]
    fn merge_mappings_agrees_with_deep_update(
        defaults in mapping_strategy(),
        user in mapping_strategy(),
        project in mapping_strategy()
    ) {
        let merged = ConfigMerger::merge_mappings(&defaults, Some(&user), Some(&project));
        let chained = ConfigMerger::deep_update(&ConfigMerger::deep_update(&defaults, &user), &project);
        prop_assert_eq!(merged, chained);
    }
}
