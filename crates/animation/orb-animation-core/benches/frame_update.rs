use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orb_animation_core::{build_blob_path, AnimationContext, Config, Point, Preset};

fn bench_frame_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_update");
    for point_count in [8usize, 16, 64] {
        group.bench_with_input(
            BenchmarkId::new("session", point_count),
            &point_count,
            |b, &k| {
                let mut cfg = Config::default().with_seed(3);
                cfg.point_count = k;
                let mut ctx = AnimationContext::new(cfg);
                let handle = ctx.handle();
                handle.set_activity_target(0.7);
                let mut t = 0.0;
                b.iter(|| {
                    // restart before the box pattern runs out
                    if t % 60.0 < 1.0 / 60.0 {
                        let _ = handle.start_pattern(Preset::Box.pattern());
                    }
                    t += 1.0 / 60.0;
                    black_box(ctx.update(t).frame.scale)
                });
            },
        );
    }
    group.finish();
}

fn bench_blob_path(c: &mut Criterion) {
    let offsets: Vec<f64> = (0..16).map(|i| 0.05 * (i as f64).sin()).collect();
    let center = Point::new(256.0, 256.0);
    c.bench_function("blob_path_k16", |b| {
        b.iter(|| black_box(build_blob_path(center, black_box(180.0), &offsets)))
    });
}

criterion_group!(benches, bench_frame_update, bench_blob_path);
criterion_main!(benches);
