//! # ECS Performance Benchmark
//!
//! ARCHITECT'S REQUIREMENTS:
//! - 100,000 entities
//! - Linear-time signature scans
//! - No per-step allocation during iteration
//!
//! Run with: `cargo bench --package wyrm_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use bytemuck::{Pod, Zeroable};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wyrm_core::{EntityId, World};

/// Entity pool size shared by the benchmarks below.
const ENTITY_COUNT: usize = 100_000;

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct Transform {
    x: f32,
    y: f32,
    z: f32,
    _pad: f32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct Velocity {
    dx: f32,
    dy: f32,
    dz: f32,
    _pad: f32,
}

/// Generate deterministic "random" indices for reproducible benchmarks
fn generate_random_indices(count: usize, max: usize, seed: u64) -> Vec<usize> {
    let mut indices = Vec::with_capacity(count);
    let mut state = seed;

    for _ in 0..count {
        // Simple xorshift for deterministic randomness
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        indices.push((state as usize) % max);
    }

    indices
}

/// World with every slot live and a transform on every entity.
fn build_populated_world() -> (World, Vec<EntityId>) {
    let mut world = World::with_capacity(ENTITY_COUNT);
    let mut ids = Vec::with_capacity(ENTITY_COUNT);

    for i in 0..ENTITY_COUNT {
        let entity = world.spawn();
        let f = i as f32;
        world.add_component(
            entity,
            Transform {
                x: f * 0.1,
                y: f * 0.2,
                z: f * 0.3,
                _pad: 0.0,
            },
        );
        ids.push(entity);
    }

    (world, ids)
}

/// Benchmark: Create a world with 100K entity slots.
fn bench_world_creation(c: &mut Criterion) {
    c.bench_function("world_creation_100K", |b| {
        b.iter(|| black_box(World::with_capacity(ENTITY_COUNT)));
    });
}

/// Benchmark: Spawn entities until the pool is full.
fn bench_spawn_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_entities");

    for count in [1_000, 10_000, ENTITY_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut world = World::with_capacity(count);
                for _ in 0..count {
                    black_box(world.spawn());
                }
                world.alive_count()
            });
        });
    }

    group.finish();
}

/// Benchmark: Entity spawn/despawn cycle through the free list.
fn bench_spawn_despawn_cycle(c: &mut Criterion) {
    let mut world = World::with_capacity(ENTITY_COUNT);

    // Pre-spawn half
    let mut ids = Vec::with_capacity(ENTITY_COUNT / 2);
    for _ in 0..(ENTITY_COUNT / 2) {
        ids.push(world.spawn());
    }

    c.bench_function("spawn_despawn_cycle_10K", |b| {
        b.iter(|| {
            // Despawn 10K
            for id in ids.iter().take(10_000) {
                world.despawn(*id);
            }
            // Respawn 10K
            for id in ids.iter_mut().take(10_000) {
                *id = world.spawn();
            }
            black_box(world.alive_count())
        });
    });
}

/// Benchmark: Attach and detach a component across 10K entities.
fn bench_attach_detach_cycle(c: &mut Criterion) {
    let mut world = World::with_capacity(ENTITY_COUNT);
    let ids: Vec<EntityId> = (0..10_000).map(|_| world.spawn()).collect();

    c.bench_function("attach_detach_cycle_10K", |b| {
        b.iter(|| {
            for &id in &ids {
                world.add_component(
                    id,
                    Velocity {
                        dx: 0.1,
                        dy: 0.2,
                        dz: 0.3,
                        _pad: 0.0,
                    },
                );
            }
            for &id in &ids {
                black_box(world.remove_component::<Velocity>(id));
            }
            world.alive_count()
        });
    });
}

/// Benchmark: Component storage access patterns.
fn bench_component_access(c: &mut Criterion) {
    let (mut world, ids) = build_populated_world();

    let mut group = c.benchmark_group("component_access");

    // Sequential read over the packed array
    group.bench_function("sequential_read_100K", |b| {
        b.iter(|| {
            let mut sum = 0.0_f32;
            if let Some(storage) = world.storage::<Transform>() {
                for transform in storage.as_slice() {
                    sum += transform.x;
                }
            }
            black_box(sum)
        });
    });

    // Sequential write over the packed array
    group.bench_function("sequential_write_100K", |b| {
        b.iter(|| {
            if let Some(storage) = world.storage_mut::<Transform>() {
                for transform in storage.as_mut_slice() {
                    transform.x += 0.001;
                }
            }
            black_box(world.alive_count())
        });
    });

    // Random access through entity handles (worst case for cache)
    let random_indices = generate_random_indices(10_000, ENTITY_COUNT, 0xDEAD_BEEF);
    group.bench_function("random_access_10K", |b| {
        b.iter(|| {
            let mut sum = 0.0_f32;
            for &idx in &random_indices {
                if let Some(transform) = world.get_component::<Transform>(ids[idx]) {
                    sum += transform.x;
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

/// Benchmark: Signature scans at different component densities.
fn bench_signature_iteration(c: &mut Criterion) {
    let mut world = World::with_capacity(ENTITY_COUNT);
    for i in 0..ENTITY_COUNT {
        let entity = world.spawn();
        let f = i as f32;
        world.add_component(
            entity,
            Transform {
                x: f,
                y: f,
                z: f,
                _pad: 0.0,
            },
        );
        // A quarter of the entities can move
        if i % 4 == 0 {
            world.add_component(
                entity,
                Velocity {
                    dx: 0.1,
                    dy: 0.2,
                    dz: 0.3,
                    _pad: 0.0,
                },
            );
        }
    }

    let mut group = c.benchmark_group("signature_iteration");

    group.bench_function("all_live_100K", |b| {
        b.iter(|| black_box(world.iter_alive().count()));
    });

    group.bench_function("single_type_100K", |b| {
        b.iter(|| black_box(world.entities_with::<(Transform,)>().count()));
    });

    group.bench_function("pair_quarter_density_100K", |b| {
        b.iter(|| {
            let mut sum = 0.0_f32;
            for entity in world.entities_with::<(Transform, Velocity)>() {
                if let Some(velocity) = world.get_component::<Velocity>(entity) {
                    sum += velocity.dx;
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

/// Benchmark: Live-entity scans over fragmented slot tables.
fn bench_fragmented_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragmentation");

    for frag_percent in [0_usize, 25, 50, 75] {
        let mut world = World::with_capacity(ENTITY_COUNT);
        let ids: Vec<EntityId> = (0..ENTITY_COUNT).map(|_| world.spawn()).collect();
        for (i, &id) in ids.iter().enumerate() {
            world.add_component(
                id,
                Transform {
                    x: i as f32,
                    y: 0.0,
                    z: 0.0,
                    _pad: 0.0,
                },
            );
            let despawn = match frag_percent {
                25 => i % 4 == 0,
                50 => i % 2 == 0,
                75 => i % 4 != 0,
                _ => false,
            };
            if despawn {
                world.despawn(id);
            }
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{frag_percent}%_fragmented")),
            &world,
            |b, world| {
                b.iter(|| black_box(world.entities_with::<(Transform,)>().count()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_world_creation,
    bench_spawn_entities,
    bench_spawn_despawn_cycle,
    bench_attach_detach_cycle,
    bench_component_access,
    bench_signature_iteration,
    bench_fragmented_iteration,
);

criterion_main!(benches);
