//! Benchmarks for the cube engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rubiks::grid::format_net;
use rubiks::moves::parse_sequence;
use rubiks::RubiksCube;

/// Benchmark applying a fixed sequence of 24 quarter turns.
fn bench_apply_sequence(c: &mut Criterion) {
    let sequence = parse_sequence("R U R' U' F B' L D' R U R' U' F B' L D' R U R' U' F B' L D'").unwrap();

    c.bench_function("apply_sequence", |b| {
        b.iter(|| {
            let mut cube = RubiksCube::new(3).unwrap();
            for mv in black_box(&sequence) {
                cube.rotate_face(mv.face, mv.direction);
            }
            cube.settle()
        })
    });
}

/// Benchmark scrambling larger cubes to completion.
fn bench_scramble(c: &mut Criterion) {
    let mut group = c.benchmark_group("scramble");
    for size in [3, 5, 7] {
        group.bench_function(format!("{size}x{size}x{size}"), |b| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let mut cube = RubiksCube::new(black_box(size)).unwrap();
                cube.scramble(20, &mut rng);
                cube.settle()
            })
        });
    }
    group.finish();
}

/// Benchmark the sticker scan behind the solved check.
fn bench_is_solved(c: &mut Criterion) {
    let mut cube = RubiksCube::new(3).unwrap();

    c.bench_function("is_solved", |b| b.iter(|| black_box(&cube).is_solved()));

    cube.scramble(20, &mut StdRng::seed_from_u64(1));
    cube.settle();
    c.bench_function("is_solved_scrambled", |b| {
        b.iter(|| black_box(&cube).is_solved())
    });
}

/// Benchmark formatting the cube as a net for display.
fn bench_format_net(c: &mut Criterion) {
    let mut cube = RubiksCube::new(3).unwrap();
    cube.scramble(20, &mut StdRng::seed_from_u64(2));
    cube.settle();

    c.bench_function("format_net", |b| b.iter(|| format_net(black_box(&cube))));
}

criterion_group!(
    benches,
    bench_apply_sequence,
    bench_scramble,
    bench_is_solved,
    bench_format_net
);
criterion_main!(benches);
