use core::hint::black_box;
use core::time::Duration;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pickup_registry::{
    BasicRegistry, LockRegistry, MonotonicClock, OrderNumberRegistry, RegistryConfig, TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Orders pushed through the full lifecycle per benchmark iteration
// (per-thread for multi-threaded).
const TOTAL_ORDERS: usize = 4096;

fn zero_cooldown() -> RegistryConfig {
    RegistryConfig::default().with_order_number_cooldown(Duration::ZERO)
}

/// Allocates, readies and picks up every order. With a zero cooldown the pool
/// stays at a single number, so this measures the reuse path.
fn bench_lifecycle<R>(c: &mut Criterion, group_name: &str, registry_factory: impl Fn() -> R)
where
    R: OrderNumberRegistry,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_ORDERS as u64));

    group.bench_function(format!("elems/{TOTAL_ORDERS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let mut registry = registry_factory();
                for _ in 0..TOTAL_ORDERS {
                    let number = registry.next_idle_order_number().unwrap();
                    registry.set_order_ready(number).unwrap();
                    registry.set_order_picked_up(number).unwrap();
                    black_box(number);
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Allocates without ever releasing, so every call mints a new number after
/// scanning the whole pool for an idle one.
fn bench_mint<R>(c: &mut Criterion, group_name: &str, registry_factory: impl Fn() -> R)
where
    R: OrderNumberRegistry,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_ORDERS as u64));

    group.bench_function(format!("elems/{TOTAL_ORDERS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let mut registry = registry_factory();
                for _ in 0..TOTAL_ORDERS {
                    black_box(registry.next_idle_order_number().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Shares one lock registry across threads.
fn bench_lock_contended<T>(
    c: &mut Criterion,
    group_name: &str,
    registry_factory: impl Fn() -> LockRegistry<T>,
) where
    T: TimeSource + Send,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8] {
        let orders_per_thread = TOTAL_ORDERS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_ORDERS as u64));
        group.bench_function(
            format!("elems/{TOTAL_ORDERS}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let registry = registry_factory();
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let registry = registry.clone();
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..orders_per_thread {
                                        let number = registry.next_idle_order_number().unwrap();
                                        registry.set_order_ready(number).unwrap();
                                        registry.set_order_picked_up(number).unwrap();
                                        black_box(number);
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mock_lifecycle_basic(c: &mut Criterion) {
    bench_lifecycle(c, "mock/lifecycle/basic", || {
        BasicRegistry::with_config(zero_cooldown(), FixedMockTime { millis: 1 })
    });
}

fn benchmark_mock_lifecycle_lock(c: &mut Criterion) {
    bench_lifecycle(c, "mock/lifecycle/lock", || {
        LockRegistry::with_config(zero_cooldown(), FixedMockTime { millis: 1 })
    });
}

fn benchmark_mock_mint_basic(c: &mut Criterion) {
    bench_mint(c, "mock/mint/basic", || {
        BasicRegistry::new(FixedMockTime { millis: 1 })
    });
}

fn benchmark_mock_mint_lock(c: &mut Criterion) {
    bench_mint(c, "mock/mint/lock", || {
        LockRegistry::new(FixedMockTime { millis: 1 })
    });
}

fn benchmark_mono_lifecycle_basic(c: &mut Criterion) {
    bench_lifecycle(c, "mono/lifecycle/basic", || {
        BasicRegistry::with_config(zero_cooldown(), MonotonicClock::default())
    });
}

fn benchmark_mono_contended_lock(c: &mut Criterion) {
    bench_lock_contended(c, "mono/contended/lock", || {
        LockRegistry::with_config(zero_cooldown(), MonotonicClock::default())
    });
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_lifecycle_basic,
    benchmark_mock_lifecycle_lock,
    benchmark_mock_mint_basic,
    benchmark_mock_mint_lock,
    // Monotonic clock
    benchmark_mono_lifecycle_basic,
    benchmark_mono_contended_lock,
);
criterion_main!(benches);
