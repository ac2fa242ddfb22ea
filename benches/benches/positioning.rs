// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use twine_floating::{Placement, PositionOptions, Positioner, Rects, Solver};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1024.0, 768.0);

fn rects_at(x: f64, y: f64) -> Rects {
    Rects {
        reference: Rect::new(x, y, x + 80.0, y + 24.0),
        floating: Size::new(200.0, 160.0),
        arrow: Some(Size::new(8.0, 8.0)),
    }
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");
    // Centered fits without flipping; the corner forces flip and shift.
    let cases = [("fits", rects_at(400.0, 300.0)), ("corner", rects_at(980.0, 750.0))];
    for placement in ["bottom-start", "right", "top-end"] {
        let options = PositionOptions {
            placement: placement.parse::<Placement>().unwrap(),
            flip: Some(4.0),
            shift: Some(4.0),
            ..PositionOptions::default()
        };
        for (name, rects) in &cases {
            group.bench_with_input(
                BenchmarkId::new(*name, placement),
                rects,
                |b, rects| {
                    b.iter(|| black_box(Solver.position(rects, VIEWPORT, &options)));
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
