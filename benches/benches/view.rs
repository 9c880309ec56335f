// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_gesture_state::pinch::{PinchStep, TouchPair, focus_scale};
use understory_viewbox::{
    Align, Margins, MeetOrSlice, PreserveAspectRatio, View, ViewportFit, constrain_to_margins,
};

const BASELINE: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

/// A drag that wobbles around the origin with a zoom every eighth step.
fn session(view: &mut View, steps: usize) {
    for i in 0..steps {
        let t = i as f64 * 0.1;
        view.pan(Vec2::new(t.sin() * 4.0, t.cos() * 3.0));
        if i % 8 == 0 {
            let ratio = if i % 16 == 0 { 1.1 } else { 1.0 / 1.1 };
            view.zoom_about(ratio, Point::new(960.0, 540.0));
        }
    }
}

fn bench_channels(c: &mut Criterion) {
    let mut group = c.benchmark_group("view/session");

    // Hypothesis: the proxy channel composes matrices and should stay close to
    // the viewbox channel, which maps a rectangle per step.
    for steps in [64usize, 1_024, 16_384] {
        group.throughput(Throughput::Elements(steps as u64));

        group.bench_with_input(BenchmarkId::new("viewbox", steps), &steps, |b, &steps| {
            b.iter(|| {
                let mut view = View::Viewbox(BASELINE);
                session(&mut view, steps);
                black_box(view.effective_rect());
            });
        });

        group.bench_with_input(BenchmarkId::new("proxy", steps), &steps, |b, &steps| {
            b.iter(|| {
                let mut view = View::Viewbox(BASELINE).with_proxy(Affine::IDENTITY);
                session(&mut view, steps);
                black_box(view.settle());
            });
        });
    }

    group.finish();
}

fn bench_pinch(c: &mut Criterion) {
    let mut group = c.benchmark_group("view/pinch");
    let samples: Vec<TouchPair> = (0..256)
        .map(|i| {
            let spread = 100.0 + f64::from(i);
            TouchPair::new(Point::new(500.0, 500.0), Point::new(500.0 + spread, 520.0))
        })
        .collect();
    group.throughput(Throughput::Elements(samples.len() as u64));

    group.bench_function("apply_steps", |b| {
        b.iter(|| {
            let mut view = View::Viewbox(BASELINE).with_proxy(Affine::IDENTITY);
            for pair in samples.windows(2) {
                if let Some(step) = PinchStep::between(pair[0], pair[1]) {
                    view.apply_pinch(focus_scale(step.anchor(), step.focus, step.amount));
                }
            }
            black_box(view.settle());
        });
    });

    group.finish();
}

fn bench_margins(c: &mut Criterion) {
    let mut group = c.benchmark_group("view/constrain_to_margins");
    let margins = Some(Margins::uniform(200.0));
    let candidates: Vec<Rect> = (0..1_024)
        .map(|i| {
            let offset = f64::from(i) * 7.0 - 3_500.0;
            Rect::from_origin_size(Point::new(offset, -offset), Size::new(960.0, 540.0))
        })
        .collect();
    group.throughput(Throughput::Elements(candidates.len() as u64));

    for (name, client) in [
        ("matching", Size::new(1920.0, 1080.0)),
        ("letterboxed", Size::new(800.0, 800.0)),
    ] {
        let fit = ViewportFit::new(
            PreserveAspectRatio {
                align: Align::XMidYMid,
                meet_or_slice: MeetOrSlice::Meet,
            },
            client,
        );
        group.bench_with_input(BenchmarkId::from_parameter(name), &fit, |b, &fit| {
            b.iter(|| {
                for &rect in &candidates {
                    black_box(constrain_to_margins(rect, BASELINE, margins, fit));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_channels, bench_pinch, bench_margins);
criterion_main!(benches);
