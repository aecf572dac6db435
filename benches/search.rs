// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use nestdraw::nav::Navigator;
use nestdraw::query::{navigate_to_node, SearchIndex};
use nestdraw::surface::MemorySurface;

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group name in this file: `query.search`
// - Case IDs must remain stable across refactors (e.g. `index_medium`, `navigate_deepest_medium`).
fn benches_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("query.search");

    for (name, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        let state = fixtures::document(case);
        let index = SearchIndex::from_root(state.current());

        group.bench_function(format!("index_{name}"), |b| {
            b.iter(|| black_box(SearchIndex::from_root(black_box(state.current())).len()))
        });
        group.bench_function(format!("query_hit_{name}"), |b| {
            b.iter(|| black_box(index.search(black_box("task n-1-")).len()))
        });
        group.bench_function(format!("query_blank_{name}"), |b| {
            b.iter(|| black_box(index.search(black_box("  ")).len()))
        });

        let deepest = fixtures::deepest_node_id(case);
        let entry = index
            .entries()
            .iter()
            .find(|entry| entry.node_id == deepest)
            .cloned()
            .expect("deepest entry");
        group.bench_function(format!("navigate_deepest_{name}"), |b| {
            b.iter_batched(
                || Navigator::with_state(state.clone(), MemorySurface::new()),
                |mut navigator| {
                    navigate_to_node(&mut navigator, black_box(&entry)).expect("navigate_to_node");
                    black_box(navigator.depth())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_search
}
criterion_main!(benches);
