//! Edit-to-preview benchmarks for armorsmith_core.
//!
//! Run with: `cargo bench -p armorsmith_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use armorsmith_core::config::Edit;
use armorsmith_core::preview::{commit, on_edit, preview};
use armorsmith_test_utils::fixtures::{grenadiers, standard_catalog};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Full recompute after a single edit, the editor's hot path.
pub fn preview_benchmark(c: &mut Criterion) {
    let catalog = standard_catalog();
    let config = grenadiers(&catalog);

    c.bench_function("preview_grenadiers", |b| {
        b.iter(|| preview(black_box(&config), &catalog));
    });

    c.bench_function("on_edit_armor_sweep", |b| {
        let mut config = config.clone();
        b.iter(|| {
            for points in 0..=10 {
                let _ = on_edit(&mut config, &catalog, black_box(&Edit::SetArmorValue(points)));
            }
        });
    });

    c.bench_function("commit_grenadiers", |b| {
        b.iter(|| commit(black_box(&config), &catalog));
    });
}

criterion_group!(benches, preview_benchmark);
criterion_main!(benches);
