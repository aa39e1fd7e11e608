use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat4, Vec3};
use maze_walker::config::Settings;
use maze_walker::math::{BoundingSphere, AABB};
use maze_walker::scene::{ControllerKind, Scene};
use maze_walker::traits::{Action, Button, InputEvent};
use winit::keyboard::ModifiersState;

/// Deterministic spread of points around the origin
fn scatter(i: usize) -> Vec3 {
    let t = i as f32;
    Vec3::new((t * 0.1) % 20.0 - 10.0, (t * 0.2) % 4.0 - 2.0, -((t * 0.3) % 20.0))
}

/// Benchmark: Sphere overlap and contact normal
fn bench_sphere_contact(c: &mut Criterion) {
    let a = BoundingSphere::new(Vec3::ZERO, 0.5);
    let b = BoundingSphere::new(Vec3::new(0.6, 0.2, -0.1), 0.4);

    c.bench_function("sphere_intersects", |bench| {
        bench.iter(|| black_box(black_box(a).intersects(black_box(&b))))
    });
    c.bench_function("sphere_contact", |bench| {
        bench.iter(|| black_box(black_box(a).contact(black_box(&b))))
    });
}

/// Benchmark: Box overlap and least-penetration normal
fn bench_aabb_contact(c: &mut Criterion) {
    let a = AABB::cube(Vec3::ZERO, 0.5);
    let b = AABB::cube(Vec3::new(0.7, 0.1, -0.3), 0.5);

    c.bench_function("aabb_intersects", |bench| {
        bench.iter(|| black_box(black_box(a).intersects(black_box(&b))))
    });
    c.bench_function("aabb_contact_normal", |bench| {
        bench.iter(|| black_box(black_box(a).contact_normal(black_box(&b))))
    });
}

/// Benchmark: Local box to world box under a rotating model matrix
fn bench_aabb_transformed(c: &mut Criterion) {
    let local = AABB::new(Vec3::new(-1.0, -0.5, -0.25), Vec3::new(1.0, 0.5, 0.25));
    let model = Mat4::from_translation(Vec3::new(3.0, 0.5, -2.0))
        * Mat4::from_rotation_y(0.7)
        * Mat4::from_scale(Vec3::splat(0.5));

    c.bench_function("aabb_transformed", |bench| {
        bench.iter(|| black_box(black_box(local).transformed(black_box(&model))))
    });
}

/// Benchmark: Broad phase (spheres) versus boxes only over many obstacles
fn bench_broad_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("broad_phase");
    let player_sphere = BoundingSphere::new(Vec3::new(0.0, 0.2, -5.0), 0.2);
    let player_box = AABB::cube(player_sphere.center, 0.2);

    for count in [100, 1000, 10000].iter() {
        let boxes: Vec<AABB> = (0..*count).map(|i| AABB::cube(scatter(i), 0.5)).collect();
        let spheres: Vec<BoundingSphere> = boxes.iter().map(AABB::bounding_sphere).collect();

        group.bench_with_input(BenchmarkId::new("sphere_then_box", count), count, |b, _| {
            b.iter(|| {
                let hits = spheres
                    .iter()
                    .zip(&boxes)
                    .filter(|(s, bx)| player_sphere.intersects(s) && player_box.intersects(bx))
                    .count();
                black_box(hits)
            })
        });
        group.bench_with_input(BenchmarkId::new("box_only", count), count, |b, _| {
            b.iter(|| black_box(boxes.iter().filter(|bx| player_box.intersects(bx)).count()))
        });
    }

    group.finish();
}

/// Benchmark: One game controller frame against a generated maze
fn bench_maze_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("maze_update");

    for size in [15, 31, 61].iter() {
        let mut settings = Settings::default();
        settings.maze.rows = *size;
        settings.maze.cols = *size;
        settings.maze.seed = Some(7);

        let mut scene = match Scene::new(settings, 4.0 / 3.0, ControllerKind::Game) {
            Ok(scene) => scene,
            Err(e) => panic!("Failed to build scene: {}", e),
        };
        scene.handle_event(&InputEvent::Keyboard {
            key: Button::KeyW,
            action: Action::Press,
            mods: ModifiersState::empty(),
        });
        let start = scene.camera.clone();

        group.bench_with_input(BenchmarkId::new("walls", size), size, |b, _| {
            b.iter(|| {
                scene.camera = start.clone();
                if let Some(game) = scene.controller.as_game_mut() {
                    game.set_bounding_space(&start, 0.2);
                }
                black_box(scene.update())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sphere_contact,
    bench_aabb_contact,
    bench_aabb_transformed,
    bench_broad_phase,
    bench_maze_update,
);

criterion_main!(benches);
