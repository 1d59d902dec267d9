//! Benchmarks for spline fitting and LUT construction.
//!
//! Run with: cargo bench --bench curve_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tonecurve::{ClipInterval, ControlPoint, CubicSpline, CurveConfig, CurveEditor, LutStrategy, ToneLut};

fn control_points(count: usize) -> Vec<ControlPoint> {
    let last = (count - 1) as f32;
    (0..count)
        .map(|i| {
            let x = i as f32 / last * 255.0;
            // Gentle S-curve so interior moments are non-zero.
            let t = x / 255.0;
            let y = -(255.0 * t * t * (3.0 - 2.0 * t));
            ControlPoint::new(x, y)
        })
        .collect()
}

fn bench_spline_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline_fit");
    for count in [3usize, 8, 32] {
        let points = control_points(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| std::hint::black_box(CubicSpline::fit(std::hint::black_box(points))));
        });
    }
    group.finish();
}

fn bench_spline_sample(c: &mut Criterion) {
    let spline = match CubicSpline::fit(&control_points(8)) {
        Ok(spline) => spline,
        Err(e) => panic!("fit failed: {e}"),
    };
    let clip = match ClipInterval::new(-255.0, 0.0) {
        Ok(clip) => clip,
        Err(e) => panic!("clip failed: {e}"),
    };

    let mut group = c.benchmark_group("spline_sample");
    group.throughput(Throughput::Elements(CurveConfig::DEFAULT_SAMPLE_COUNT as u64));
    group.bench_function("default_count", |b| {
        b.iter(|| {
            std::hint::black_box(spline.sample(CurveConfig::DEFAULT_SAMPLE_COUNT, clip));
        });
    });
    group.finish();
}

fn bench_lut_build(c: &mut Criterion) {
    let points = control_points(8);
    let mut group = c.benchmark_group("lut_build");
    group.throughput(Throughput::Elements(ToneLut::SIZE as u64));
    for strategy in [LutStrategy::Spline, LutStrategy::Linear] {
        let config = CurveConfig::default().with_strategy(strategy);
        group.bench_function(format!("{strategy:?}").to_lowercase(), |b| {
            b.iter(|| std::hint::black_box(ToneLut::build(&points, &config)));
        });
    }
    group.finish();
}

fn bench_lut_lookup(c: &mut Criterion) {
    let lut = ToneLut::identity();
    let pixels: Vec<u8> = (0..4096u32).map(|i| (i * 37 % 256) as u8).collect();

    let mut group = c.benchmark_group("lut_apply");
    group.throughput(Throughput::Elements(pixels.len() as u64));
    group.bench_function("4096_pixels", |b| {
        b.iter(|| {
            for &pixel in &pixels {
                std::hint::black_box(lut.lookup(std::hint::black_box(pixel)));
            }
        });
    });
    group.finish();
}

/// One drag gesture: many small moves of the same point.
fn bench_editor_drag(c: &mut Criterion) {
    let mut editor = match CurveEditor::new(CurveConfig::default()) {
        Ok(editor) => editor,
        Err(e) => panic!("editor failed: {e}"),
    };
    let id = match editor.add_point(64.0, -64.0) {
        Ok(id) => id,
        Err(e) => panic!("add failed: {e}"),
    };

    c.bench_function("editor_drag_60_moves", |b| {
        b.iter(|| {
            for step in 0..60 {
                let y = -64.0 - step as f32;
                let _ = std::hint::black_box(editor.move_point(id, 64.0, y));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_spline_fit,
    bench_spline_sample,
    bench_lut_build,
    bench_lut_lookup,
    bench_editor_drag
);
criterion_main!(benches);
