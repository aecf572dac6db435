// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use nestdraw::store::{decode_state, encode_state, GraphFile, WriteDurability};

mod fixtures;
mod profiler;

use fixtures::{Case, TempDir};

// Benchmark identity (keep stable):
// - Group names in this file: `store.codec`, `store.graph_file`
// - Case IDs (the string after the `/`) must remain stable across refactors so results stay
//   comparable over time (e.g. `encode_small`, `save_medium`).
fn benches_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.codec");

    for (name, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        let state = fixtures::document(case);
        let text = encode_state(&state).expect("encode_state");

        group.bench_function(format!("encode_{name}"), |b| {
            b.iter(|| black_box(encode_state(black_box(&state)).expect("encode_state").len()))
        });
        group.bench_function(format!("decode_{name}"), |b| {
            b.iter(|| black_box(decode_state(black_box(&text)).expect("decode_state").depth()))
        });
    }
    group.finish();
}

fn benches_graph_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.graph_file");

    for (name, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        let state = fixtures::document(case);

        group.bench_function(format!("save_{name}"), |b| {
            b.iter_batched_ref(
                || TempDir::new(&format!("store_save_{name}")),
                |tmp| {
                    let file = GraphFile::new(tmp.path().join("graph-data.json"));
                    file.save_state(black_box(&state)).expect("save_state");
                    black_box(std::fs::metadata(file.path()).expect("document metadata").len())
                },
                BatchSize::SmallInput,
            )
        });

        let tmp = TempDir::new(&format!("store_load_{name}"));
        let file = GraphFile::new(tmp.path().join("graph-data.json"))
            .with_durability(WriteDurability::BestEffort);
        file.save_state(&state).expect("save_state");
        group.bench_function(format!("load_{name}"), |b| {
            b.iter(|| black_box(file.load_state().expect("load_state").depth()))
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_codec, benches_graph_file
}
criterion_main!(benches);
