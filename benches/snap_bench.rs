use brush_snap::core::{LinearScale, TimeScale};
use brush_snap::snap::{
    BrushMode, BrushPhase, DragEvent, LinearSnapper, TimeSnapConfig, TimeSnapper, nearest_index,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_nearest_index_10k(c: &mut Criterion) {
    let table: Vec<f64> = (0..10_000).map(|i| f64::from(i) * 1.5).collect();

    c.bench_function("nearest_index_10k", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for target in [0.2, 1_234.7, 7_499.9, 14_999.0, 20_000.0] {
                acc += nearest_index(black_box(&table), black_box(target));
            }
            acc
        })
    });
}

fn bench_linear_snap(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 500.0), (0.0, 1_920.0)).expect("valid scale");
    let snapper = LinearSnapper::new(scale, 5.0, 0.0, 500.0).expect("snapper");

    c.bench_function("linear_snap", |b| {
        b.iter(|| snapper.snap(black_box([311.4, 312.0])))
    });
}

fn bench_time_snap_gesture(c: &mut Criterion) {
    let day_ms = 86_400_000.0;
    let extent_end = 90.0 * day_ms;
    let scale = TimeScale::new((0.0, extent_end), (0.0, 1_600.0)).expect("valid time scale");
    let config = TimeSnapConfig::new(0.0, extent_end, 1_600.0)
        .with_num_ticks(12)
        .with_brush(10.0 * day_ms, 40.0 * day_ms)
        .with_extent_snapping(true);
    let mut snapper = TimeSnapper::new(scale, config).expect("snapper");

    let gesture: Vec<DragEvent> = (0..64)
        .map(|i| {
            let phase = match i {
                0 => BrushPhase::Start,
                63 => BrushPhase::End,
                _ => BrushPhase::Brush,
            };
            let west = 200.0 + f64::from(i) * 7.5;
            DragEvent::user(phase, BrushMode::Drag, [west, west + 480.0])
        })
        .collect();

    c.bench_function("time_snap_drag_gesture_64", |b| {
        b.iter(|| {
            let mut previous = snapper.initial_result();
            for event in &gesture {
                let result = snapper.snap(black_box(event), &previous);
                if event.phase == BrushPhase::End {
                    previous = result;
                }
            }
            previous
        })
    });
}

criterion_group!(
    benches,
    bench_nearest_index_10k,
    bench_linear_snap,
    bench_time_snap_gesture
);
criterion_main!(benches);
