use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mandeltouch_core::{Complex, Viewport};
use mandeltouch_render::{color_of, render, PixelBuffer, RenderMode};

fn bench_full_frame_render(c: &mut Criterion) {
    let mut viewport = Viewport::default();
    let mut buffer = PixelBuffer::new(800, 600).unwrap();

    c.bench_function("full_frame_800x600_sequential", |b| {
        b.iter(|| render(&mut viewport, &mut buffer, RenderMode::Sequential));
    });
    c.bench_function("full_frame_800x600_parallel", |b| {
        b.iter(|| render(&mut viewport, &mut buffer, RenderMode::Parallel));
    });
}

fn bench_deep_iteration(c: &mut Criterion) {
    let mut viewport = Viewport::new(2_000.0, Complex::new(-0.743_643, 0.131_825), 1000).unwrap();
    let mut buffer = PixelBuffer::new(256, 256).unwrap();

    c.bench_function("render_256x256_1000iter", |b| {
        b.iter(|| render(&mut viewport, &mut buffer, RenderMode::Parallel));
    });
}

fn bench_color_of(c: &mut Criterion) {
    c.bench_function("color_of_full_range", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for n in 0..=256 {
                acc ^= color_of(black_box(n), 256);
            }
            acc
        });
    });
}

criterion_group!(
    benches,
    bench_full_frame_render,
    bench_deep_iteration,
    bench_color_of
);
criterion_main!(benches);
