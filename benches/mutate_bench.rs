use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use jed::document::mutate::{insert_child, set_value, ChildKind};
use jed::document::{NodePath, Stats};
use jed::editor::CollapseSet;
use jed::ui::flatten;

/// Builds a document with `width` keys per object, nested `depth` deep.
fn sample_doc(width: usize, depth: usize) -> Value {
    if depth == 0 {
        return json!({"id": 1, "name": "leaf", "active": true, "score": 3.5});
    }
    let mut map = serde_json::Map::new();
    for i in 0..width {
        map.insert(format!("child_{}", i), sample_doc(width, depth - 1));
    }
    Value::Object(map)
}

fn mutate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate");

    for depth in [2, 3].iter() {
        let doc = sample_doc(4, *depth);
        let path = NodePath::root().child_key("child_0").child_key("child_1");
        group.bench_with_input(BenchmarkId::new("set_value", depth), depth, |b, _| {
            b.iter(|| black_box(set_value(&doc, &path, json!(42))))
        });
        group.bench_with_input(BenchmarkId::new("insert_child", depth), depth, |b, _| {
            b.iter(|| black_box(insert_child(&doc, &NodePath::root(), ChildKind::String)))
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let doc = sample_doc(4, 3);
    let collapse = CollapseSet::new();

    group.bench_function("flatten", |b| {
        b.iter(|| black_box(flatten(&doc, &collapse)))
    });

    group.bench_function("stats", |b| b.iter(|| black_box(Stats::compute(&doc))));

    group.finish();
}

criterion_group!(benches, mutate_benchmark, render_benchmark);
criterion_main!(benches);
