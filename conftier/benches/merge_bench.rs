use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use conftier::{ConfigMerger, ConfigModel, MappingSchema};
use serde_yaml::{Mapping, Value};
use std::sync::Arc;

/// A mapping `width` keys wide and `depth` levels deep.
fn tree(width: usize, depth: usize, leaf: i64) -> Mapping {
    let mut mapping = Mapping::new();
    for i in 0..width {
        let value = if depth == 0 {
            Value::from(leaf + i as i64)
        } else {
            Value::Mapping(tree(width, depth - 1, leaf))
        };
        mapping.insert(Value::from(format!("key{i}")), value);
    }
    mapping
}

fn bench_deep_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_update");

    for (width, depth) in [(4, 2), (8, 3), (16, 2)] {
        let base = tree(width, depth, 0);
        let patch = tree(width / 2, depth, 100);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{depth}")),
            &(base, patch),
            |b, (base, patch)| {
                b.iter(|| ConfigMerger::deep_update(black_box(base), black_box(patch)));
            },
        );
    }

    group.finish();
}

fn bench_merge_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_configs");

    let schema = Arc::new(MappingSchema::new(tree(8, 2, 0)));
    let default = ConfigModel::from_schema(Arc::clone(&schema), None).unwrap();
    let user = ConfigModel::from_schema(Arc::clone(&schema), Some(&tree(4, 2, 10))).unwrap();
    let project = ConfigModel::from_schema(Arc::clone(&schema), Some(&tree(2, 2, 20))).unwrap();

    group.bench_function("three_layers", |b| {
        b.iter(|| {
            ConfigMerger::merge_configs(
                black_box(&default),
                black_box(Some(&user)),
                black_box(Some(&project)),
            )
        });
    });

    group.bench_function("defaults_only", |b| {
        b.iter(|| ConfigMerger::merge_configs(black_box(&default), None, None));
    });

    group.finish();
}

fn bench_get_value(c: &mut Criterion) {
    let schema = Arc::new(MappingSchema::new(tree(8, 3, 0)));
    let model = ConfigModel::from_schema(schema, None).unwrap();

    c.bench_function("get_value_depth_4", |b| {
        b.iter(|| model.get_value(black_box("key3.key5.key1.key7")));
    });
}

criterion_group!(benches, bench_deep_update, bench_merge_configs, bench_get_value);
criterion_main!(benches);
