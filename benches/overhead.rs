//! Wrapper overhead against bare calls. Events go to a sink writer so
//! formatting cost is measured but terminal I/O is not.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tracing_subscriber::EnvFilter;
use wiretap::{AllocLog, CallLog, Callable, Timed};

fn add(a: u64, b: u64) -> u64 {
    a.wrapping_add(b)
}

fn bench_wrappers(c: &mut Criterion) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("wiretap=info"))
        .with_writer(std::io::sink)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    c.bench_function("bare_add", |b| {
        b.iter(|| add(black_box(2), black_box(3)))
    });

    let logged = CallLog::new("add", add);
    c.bench_function("call_log_add", |b| {
        b.iter(|| logged.call((black_box(2), black_box(3))))
    });

    let timed = Timed::new("add", CallLog::new("add", add));
    c.bench_function("timed_call_log_add", |b| {
        b.iter(|| timed.call((black_box(2), black_box(3))))
    });

    // Counters are not installed here, so this measures the capture and
    // compare path alone.
    let alloc_logged = AllocLog::new("add", add);
    c.bench_function("alloc_log_add", |b| {
        b.iter(|| alloc_logged.call((black_box(2), black_box(3))))
    });
}

criterion_group!(benches, bench_wrappers);
criterion_main!(benches);
