use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use zns_cache_sim::engine::Engine;
use zns_cache_sim::iolog::IoKind;
use zns_cache_sim::policy::Policy;

fn cyclic_trace(length: usize, working_set: u64) -> Vec<u64> {
    (0..length as u64).map(|i| i % working_set).collect()
}

fn bench_policy(c: &mut Criterion, policy: Policy, label: &str) {
    let mut group = c.benchmark_group(label);
    for &buffer_size in &[16usize, 64, 256] {
        let trace = cyclic_trace(10_000, buffer_size as u64 * 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(buffer_size),
            &buffer_size,
            |b, &buffer_size| {
                b.iter(|| {
                    let mut engine = Engine::new(buffer_size, policy);
                    for &page in &trace {
                        engine.access(page, IoKind::Read);
                    }
                    engine.hits()
                });
            },
        );
    }
    group.finish();
}

fn fifo_benchmark(c: &mut Criterion) {
    bench_policy(c, Policy::Fifo, "fifo");
}

fn lru_benchmark(c: &mut Criterion) {
    bench_policy(c, Policy::Lru, "lru");
}

fn lru_arc_benchmark(c: &mut Criterion) {
    bench_policy(c, Policy::LruArc, "lru_arc");
}

fn clock_pro_t1_benchmark(c: &mut Criterion) {
    bench_policy(c, Policy::ClockProT1B4LogsB2, "clock_pro_t1");
}

criterion_group!(
    benches,
    fifo_benchmark,
    lru_benchmark,
    lru_arc_benchmark,
    clock_pro_t1_benchmark
);
criterion_main!(benches);
