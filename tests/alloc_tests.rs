//! Allocation logging against the real counting allocator. This binary
//! installs [`CountingAlloc`] globally, so the counters are live for
//! every test in the file; the other test binaries run without it.

use wiretap::wrap::capture;
use wiretap::{AllocLog, AllocStats, Callable, CountingAlloc};

#[global_allocator]
static ALLOC: CountingAlloc = CountingAlloc::system();

#[test]
fn test_counters_move_when_the_call_allocates() {
    let (sink, _guard) = capture::install();
    let grow = |n: usize| vec![0u8; n].len();
    let wrapped = AllocLog::new("grow", &grow);
    assert_eq!(wrapped.call((4096,)), 4096);

    let output = sink.contents();
    assert!(
        output.contains("Allocation counters changed for grow"),
        "got: {output}"
    );
}

#[test]
fn test_allocating_call_shows_a_positive_delta() {
    let before = AllocStats::capture();
    let data = vec![42u8; 16 * 1024];
    let after = AllocStats::capture();

    let delta = after.delta_since(&before);
    assert!(delta.allocations >= 1);
    assert!(delta.bytes_allocated >= 16 * 1024);
    drop(data);
}

#[test]
fn test_counters_are_marked_active() {
    assert!(wiretap::counters_active());
}

#[test]
fn test_peak_tracks_the_high_water_mark() {
    let block = vec![7u8; 64 * 1024];
    let stats = AllocStats::capture();
    assert!(stats.peak_live_bytes >= 64 * 1024);
    drop(block);
}

#[test]
fn test_stats_serialize_to_json() {
    let stats = AllocStats::capture();
    let json = serde_json::to_value(stats).expect("serialize stats");
    assert!(json.get("allocations").is_some());
    assert!(json.get("peak_live_bytes").is_some());
}
