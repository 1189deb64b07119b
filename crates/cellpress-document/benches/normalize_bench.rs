// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for document normalization. Builds a synthetic raw
// notebook mixing markdown cells, code cells with raster outputs, and noisy
// plain-text records, then runs the full normalization pass.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cellpress_core::types::{RawCell, RawDocument, RawOutput, TextPayload};
use cellpress_document::normalize;

/// A 200-cell raw document with the output shapes seen in real notebooks.
fn synthetic_document() -> RawDocument {
    let mut cells = Vec::with_capacity(200);
    for i in 0..200 {
        if i % 2 == 0 {
            cells.push(RawCell {
                id: format!("md-{i}"),
                cell_type: "text".into(),
                text: format!("## Section {i}\n\nsee ![plot](https://example.com/{i}.png)"),
                outputs: Vec::new(),
            });
        } else {
            let mut image = RawOutput::default();
            image
                .data
                .insert("image/png".into(), TextPayload::Single("iVBORw0KGgo=".repeat(64)));
            let mut noise = RawOutput::default();
            noise.data.insert(
                "text/plain".into(),
                TextPayload::Single("<matplotlib.figure.Figure object at 0x7f00>".into()),
            );
            cells.push(RawCell {
                id: format!("code-{i}"),
                cell_type: "code".into(),
                text: format!("plt.plot(series_{i})\r\nplt.show()"),
                outputs: vec![image, noise],
            });
        }
    }
    RawDocument {
        title: Some("Benchmark Notebook".into()),
        cells: Some(cells),
    }
}

fn bench_normalize(c: &mut Criterion) {
    let raw = synthetic_document();
    c.bench_function("normalize (200 cells)", |b| {
        b.iter(|| {
            let canonical = normalize(black_box(raw.clone()));
            black_box(canonical);
        });
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
