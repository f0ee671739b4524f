//! Process-wide allocation counters.
//!
//! [`CountingAlloc`] wraps any `GlobalAlloc` and bumps relaxed atomic
//! counters per operation. The hooks run inside the allocator itself
//! and must never allocate, lock, or log.
//!
//! Counters are monotonic except the live gauge, which goes down on
//! free. Install the wrapper once per process:
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: wiretap_probe::CountingAlloc = wiretap_probe::CountingAlloc::system();
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static DEALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static REALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static BYTES_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static BYTES_FREED: AtomicU64 = AtomicU64::new(0);
static LIVE_BYTES: AtomicU64 = AtomicU64::new(0);
static PEAK_LIVE_BYTES: AtomicU64 = AtomicU64::new(0);

/// Wraps a `GlobalAlloc` and counts every operation that flows through.
pub struct CountingAlloc<A = System> {
    inner: A,
}

impl CountingAlloc<System> {
    /// Counting wrapper over the system allocator.
    pub const fn system() -> Self {
        Self { inner: System }
    }
}

impl<A> CountingAlloc<A> {
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[allow(unsafe_code)]
unsafe impl<A: GlobalAlloc> GlobalAlloc for CountingAlloc<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size() as u64);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size() as u64);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.inner.dealloc(ptr, layout);
        record_dealloc(layout.size() as u64);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record_realloc(layout.size() as u64, new_size as u64);
        }
        new_ptr
    }
}

fn record_alloc(bytes: u64) {
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    BYTES_ALLOCATED.fetch_add(bytes, Ordering::Relaxed);
    let live = LIVE_BYTES.fetch_add(bytes, Ordering::Relaxed) + bytes;
    bump_peak(live);
}

fn record_dealloc(bytes: u64) {
    DEALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    BYTES_FREED.fetch_add(bytes, Ordering::Relaxed);
    LIVE_BYTES.fetch_sub(bytes, Ordering::Relaxed);
}

fn record_realloc(old_bytes: u64, new_bytes: u64) {
    REALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    BYTES_ALLOCATED.fetch_add(new_bytes, Ordering::Relaxed);
    BYTES_FREED.fetch_add(old_bytes, Ordering::Relaxed);
    if new_bytes > old_bytes {
        let grown = new_bytes - old_bytes;
        let live = LIVE_BYTES.fetch_add(grown, Ordering::Relaxed) + grown;
        bump_peak(live);
    } else {
        LIVE_BYTES.fetch_sub(old_bytes - new_bytes, Ordering::Relaxed);
    }
}

/// Record a new live-bytes value; updates the peak if higher.
fn bump_peak(live: u64) {
    let mut cur = PEAK_LIVE_BYTES.load(Ordering::Relaxed);
    while live > cur {
        match PEAK_LIVE_BYTES.compare_exchange(cur, live, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => break,
            Err(observed) => cur = observed,
        }
    }
}

/// True once at least one allocation has flowed through [`CountingAlloc`].
///
/// Stays false when the wrapper was never installed as the global
/// allocator, which lets callers tell "no movement" apart from "not
/// measuring".
pub fn counters_active() -> bool {
    ALLOCATIONS.load(Ordering::Relaxed) > 0
}

/// Point-in-time view of the process-wide counters.
///
/// Each field is a separate relaxed load; concurrent allocations may
/// land between them, so this is advisory rather than a consistent
/// cross-counter snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocStats {
    pub allocations: u64,
    pub deallocations: u64,
    pub reallocations: u64,
    pub bytes_allocated: u64,
    pub bytes_freed: u64,
    pub live_bytes: u64,
    pub peak_live_bytes: u64,
}

impl AllocStats {
    pub fn capture() -> Self {
        Self {
            allocations: ALLOCATIONS.load(Ordering::Relaxed),
            deallocations: DEALLOCATIONS.load(Ordering::Relaxed),
            reallocations: REALLOCATIONS.load(Ordering::Relaxed),
            bytes_allocated: BYTES_ALLOCATED.load(Ordering::Relaxed),
            bytes_freed: BYTES_FREED.load(Ordering::Relaxed),
            live_bytes: LIVE_BYTES.load(Ordering::Relaxed),
            peak_live_bytes: PEAK_LIVE_BYTES.load(Ordering::Relaxed),
        }
    }

    /// Live allocation count: allocations minus deallocations.
    pub fn live_objects(&self) -> u64 {
        self.allocations.saturating_sub(self.deallocations)
    }

    /// Counter movement from `earlier` to `self`.
    pub fn delta_since(&self, earlier: &AllocStats) -> AllocDelta {
        AllocDelta {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            deallocations: self.deallocations.saturating_sub(earlier.deallocations),
            reallocations: self.reallocations.saturating_sub(earlier.reallocations),
            bytes_allocated: self.bytes_allocated.saturating_sub(earlier.bytes_allocated),
            bytes_freed: self.bytes_freed.saturating_sub(earlier.bytes_freed),
            live_objects: self.live_objects() as i64 - earlier.live_objects() as i64,
            live_bytes: self.live_bytes as i64 - earlier.live_bytes as i64,
        }
    }
}

/// Movement between two [`AllocStats`] captures. The monotonic counters
/// stay unsigned; live gauges are signed because frees during the window
/// can take them below the starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocDelta {
    pub allocations: u64,
    pub deallocations: u64,
    pub reallocations: u64,
    pub bytes_allocated: u64,
    pub bytes_freed: u64,
    pub live_objects: i64,
    pub live_bytes: i64,
}

impl AllocDelta {
    pub fn is_empty(&self) -> bool {
        self.allocations == 0
            && self.deallocations == 0
            && self.reallocations == 0
            && self.bytes_allocated == 0
            && self.bytes_freed == 0
            && self.live_objects == 0
            && self.live_bytes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_math_handles_frees_outpacing_allocs() {
        let before = AllocStats {
            allocations: 10,
            deallocations: 2,
            reallocations: 1,
            bytes_allocated: 4096,
            bytes_freed: 512,
            live_bytes: 3584,
            peak_live_bytes: 4000,
        };
        let after = AllocStats {
            allocations: 12,
            deallocations: 11,
            reallocations: 1,
            bytes_allocated: 5120,
            bytes_freed: 4608,
            live_bytes: 512,
            peak_live_bytes: 4000,
        };
        let delta = after.delta_since(&before);
        assert_eq!(delta.allocations, 2);
        assert_eq!(delta.deallocations, 9);
        assert_eq!(delta.reallocations, 0);
        assert_eq!(delta.bytes_allocated, 1024);
        assert_eq!(delta.bytes_freed, 4096);
        assert_eq!(delta.live_objects, -7);
        assert_eq!(delta.live_bytes, -3072);
        assert!(!delta.is_empty());
    }

    #[test]
    fn self_delta_is_empty() {
        let stats = AllocStats::capture();
        assert!(stats.delta_since(&stats).is_empty());
    }

    #[test]
    fn peak_never_lowers() {
        bump_peak(64);
        bump_peak(8);
        assert!(AllocStats::capture().peak_live_bytes >= 64);
    }
}
