use criterion::{black_box, criterion_group, criterion_main, Criterion};

use essayscore_core::dataset::{DatasetIndex, DatasetLookup};
use essayscore_core::model::LabeledEssayRecord;
use essayscore_core::normalize::normalize;
use essayscore_core::structure::count_lines;

fn make_essay(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("Sentence {i} Of An Essay About The Industrial Revolution."))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn make_records(n: usize) -> Vec<LabeledEssayRecord> {
    (0..n)
        .map(|i| LabeledEssayRecord {
            essay: format!("essay number {i} {}", "padding ".repeat(50)),
            score: (i % 6) as i64 + 1,
        })
        .collect()
}

fn bench_text_signals(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_signals");
    let essay = make_essay(40);

    group.bench_function("normalize", |b| b.iter(|| normalize(black_box(&essay))));

    group.bench_function("count_lines", |b| {
        b.iter(|| count_lines(black_box(&essay)))
    });

    group.finish();
}

fn bench_dataset(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataset");

    group.bench_function("index_10k", |b| {
        b.iter_with_setup(
            || make_records(10_000),
            |records| DatasetIndex::from_records(black_box(records)),
        )
    });

    let lookup = DatasetLookup::from_tables(
        Some(DatasetIndex::from_records(make_records(10_000))),
        Some(DatasetIndex::from_records(make_records(2_000))),
    );
    let hit = make_records(5_000).pop().map(|r| r.essay).unwrap_or_default();

    group.bench_function("lookup_hit", |b| {
        b.iter(|| lookup.lookup(black_box(&hit)))
    });

    group.bench_function("lookup_miss", |b| {
        b.iter(|| lookup.lookup(black_box("an essay that is not in either table")))
    });

    group.finish();
}

criterion_group!(benches, bench_text_signals, bench_dataset);
criterion_main!(benches);
