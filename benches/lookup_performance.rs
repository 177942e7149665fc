use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docdex::index::{key, Anchor, SearchEntry, SearchIndex};

/// Build a synthetic table shaped like a large generated tree: many owners,
/// clustered label prefixes, one or two anchors per entry.
fn build_index(entries: usize) -> SearchIndex {
    let stems = [
        "Render", "Resize", "Attach", "Detach", "Advance", "Flush", "Configure", "Serialize",
    ];
    let owners = ["Canvas", "Widget", "MixerChannel", "Transport", "ClockSource"];

    let mut index = SearchIndex::new();
    for i in 0..entries {
        let label = format!("{}{}", stems[i % stems.len()], i / stems.len());
        let owner = owners[i % owners.len()];
        let entry = SearchEntry::new(
            key::make_key(&label, i as u64),
            label,
            vec![Anchor::new(
                format!("../class{}.html#a{:08x}", owner, i),
                owner,
            )],
        );
        index.insert(entry).expect("synthetic keys are unique");
    }
    index
}

fn bench_prefix_lookup(c: &mut Criterion) {
    let index = build_index(10_000);

    c.bench_function("prefix_lookup_10k", |b| {
        b.iter(|| index.find_by_prefix(black_box("render1")))
    });
}

fn bench_substring_lookup(c: &mut Criterion) {
    let index = build_index(10_000);

    c.bench_function("substring_lookup_10k", |b| {
        b.iter(|| index.find_by_substring(black_box("tach2")))
    });
}

fn bench_fuzzy_lookup(c: &mut Criterion) {
    let index = build_index(10_000);

    c.bench_function("fuzzy_lookup_10k", |b| {
        b.iter(|| index.find_fuzzy(black_box("rendor12"), 2))
    });
}

criterion_group!(
    benches,
    bench_prefix_lookup,
    bench_substring_lookup,
    bench_fuzzy_lookup
);
criterion_main!(benches);
