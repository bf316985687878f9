// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_zoom::{
    LoadedImage, ObjectFit, ResourceLocator, SourceSnapshot, StaticViewport, ZoomEffect,
    ZoomMachine, ZoomPhase, compute, resolve,
};

fn snapshot(fit: ObjectFit, natural: Size) -> SourceSnapshot {
    SourceSnapshot {
        rect: Rect::new(40.0, 120.0, 200.0, 240.0),
        natural_size: natural,
        object_fit: fit,
        resource: Some(ResourceLocator::Source("photo.jpg".into())),
    }
}

fn bench_frame_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/frame_geometry");
    let viewport = StaticViewport::new(1920.0, 1080.0);
    let loaded = LoadedImage::new(4000, 3000, "photo.jpg");

    // Recomputed on every frame of a transition, so it should stay in the tens of ns.
    for (name, fit, natural) in [
        ("fill_raster", ObjectFit::Fill, Size::new(4000.0, 3000.0)),
        ("fill_unknown", ObjectFit::Fill, Size::ZERO),
        ("cover_raster", ObjectFit::Cover, Size::new(4000.0, 3000.0)),
    ] {
        let snap = snapshot(fit, natural);
        group.bench_with_input(BenchmarkId::new("resolve+compute", name), &snap, |b, snap| {
            b.iter(|| {
                let fit = resolve(black_box(snap), 24.0, &viewport);
                black_box(compute(
                    snap,
                    &fit,
                    Some(&loaded),
                    ZoomPhase::Zoomed,
                    &viewport,
                    300.0,
                ))
            });
        });
    }

    group.finish();
}

fn bench_machine_cycle(c: &mut Criterion) {
    c.bench_function("zoom/machine_cycle", |b| {
        b.iter(|| {
            let mut m = ZoomMachine::new(300.0);
            let mut n = m.trigger().len();
            n += m.layout_measured().len();
            let dismiss = m.scrolled();
            n += dismiss.len();
            for effect in &dismiss {
                if let ZoomEffect::ScheduleTimer { id, .. } = *effect {
                    n += m.timer_fired(id).len();
                }
            }
            black_box((m.phase(), n))
        });
    });
}

criterion_group!(benches, bench_frame_geometry, bench_machine_cycle);
criterion_main!(benches);
