//! Benchmarks for per-frame animation work

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dockyard_core::profiling;
use dockyard_ui::{
    DockConfig, DockController, EasingFunction, Item, PointerEvent, ResourceSample,
    SmoothingConfig, TelemetryBoard,
};

const DT: f32 = 1.0 / 60.0;

fn bench_settle_after_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("settle_after_drop");

    for count in [8, 64, 256] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut dock = DockController::with_items(
                    DockConfig::default(),
                    (0..count).map(|i| Item::new(format!("app{}", i))),
                )
                .unwrap();
                let bottom = dock.layout().slot_center(count - 1);
                dock.handle_pointer(PointerEvent::down(20.0, 30.0));
                dock.handle_pointer(PointerEvent::moved(20.0, bottom));
                dock.handle_pointer(PointerEvent::up(20.0, bottom));

                let mut frames = 0;
                while dock.tick(DT) && frames < 600 {
                    profiling::new_frame();
                    frames += 1;
                }
                black_box(frames)
            });
        });
    }

    group.finish();
}

fn bench_telemetry_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("telemetry_frame");

    for count in [8, 64, 256] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut board = TelemetryBoard::new(SmoothingConfig {
                duration_ms: 500.0,
                easing: EasingFunction::SmoothStep,
            });
            let samples: Vec<ResourceSample> = (0..count)
                .flat_map(|i| {
                    let id = format!("app{}", i);
                    [
                        ResourceSample::new(id.as_str(), "ram", (i % 100) as f32, 0.0),
                        ResourceSample::new(id.as_str(), "gpu", ((i * 7) % 100) as f32, 0.0),
                    ]
                })
                .collect();
            board.ingest_all(&samples);

            let mut now = 0.0;
            b.iter(|| {
                now += 16.0;
                black_box(board.sample_all(black_box(now % 500.0)))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_settle_after_drop, bench_telemetry_frame);
criterion_main!(benches);
