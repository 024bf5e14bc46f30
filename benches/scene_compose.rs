use classroom_scene::frame::FrameInfo;
use classroom_scene::layout::{bench_slots, desk_slots, wall_segments};
use classroom_scene::mesh::{self, MeshKind};
use classroom_scene::renderer::{object_stride, pack_objects};
use classroom_scene::{compose, SceneConfig, SceneState};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_mesh_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_generation");
    for kind in MeshKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind.label()), &kind, |b, &kind| {
            b.iter(|| mesh::vertices(black_box(kind)))
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let config = SceneConfig::default();
    c.bench_function("layout_slots_and_walls", |b| {
        b.iter(|| {
            let walls = wall_segments(black_box(&config));
            let desks = desk_slots(black_box(&config));
            let benches = bench_slots(black_box(&config));
            walls.len() + desks.len() + benches.len()
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for rows in [6u32, 12, 24] {
        let mut config = SceneConfig::default();
        config.desk_grid.rows = rows;
        let mut state = SceneState::new(&config);
        state.fan_on = true;
        state.update(&FrameInfo::new(1, 0.5, 0.016));

        group.bench_with_input(BenchmarkId::new("rows", rows), &(config, state), |b, (config, state)| {
            b.iter(|| compose(black_box(config), black_box(state)))
        });
    }
    group.finish();
}

fn bench_frame_upload(c: &mut Criterion) {
    let config = SceneConfig::default();
    let state = SceneState::new(&config);
    let list = compose(&config, &state);
    let stride = object_stride(256);

    c.bench_function("pack_object_uniforms", |b| {
        b.iter(|| pack_objects(black_box(&list).ordered_for_blending(), stride))
    });
}

criterion_group!(
    benches,
    bench_mesh_generation,
    bench_layout,
    bench_compose,
    bench_frame_upload
);
criterion_main!(benches);
