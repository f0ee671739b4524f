//! Allocation logging around a call.
//!
//! Compares [`AllocStats`] captures from before and after the call and
//! logs only when the counters moved; a quiet run stays silent. The
//! counters are process-wide, so allocations from other threads show up
//! in the delta too.

use std::sync::atomic::{AtomicBool, Ordering};

use wiretap_probe::alloc::{counters_active, AllocStats};

use crate::call::Callable;
use crate::guard::OnUnwind;

static INACTIVE_NOTED: AtomicBool = AtomicBool::new(false);

/// Logs allocation-counter movement across each call.
pub struct AllocLog<F> {
    label: &'static str,
    inner: F,
}

impl<F> AllocLog<F> {
    pub fn new(label: &'static str, inner: F) -> Self {
        Self { label, inner }
    }
}

impl<F, Args> Callable<Args> for AllocLog<F>
where
    F: Callable<Args>,
{
    type Output = F::Output;

    fn call(&self, args: Args) -> F::Output {
        if !counters_active() && !INACTIVE_NOTED.swap(true, Ordering::Relaxed) {
            tracing::debug!(
                target: "wiretap",
                "allocation counters inactive; install wiretap_probe::CountingAlloc as the global allocator"
            );
        }
        let before = AllocStats::capture();
        let _guard = OnUnwind::new(|| {
            let after = AllocStats::capture();
            if after != before {
                let delta = after.delta_since(&before);
                tracing::warn!(
                    target: "wiretap",
                    function = self.label,
                    "{} panicked with allocation counters moving: objects {:+}, live bytes {:+}",
                    self.label,
                    delta.live_objects,
                    delta.live_bytes,
                );
            }
        });
        let out = self.inner.call(args);
        let after = AllocStats::capture();
        if after != before {
            let delta = after.delta_since(&before);
            tracing::info!(
                target: "wiretap",
                function = self.label,
                allocations = delta.allocations,
                deallocations = delta.deallocations,
                "Allocation counters changed for {}: objects {} -> {} ({:+}), live bytes {} -> {} ({:+})",
                self.label,
                before.live_objects(),
                after.live_objects(),
                delta.live_objects,
                before.live_bytes,
                after.live_bytes,
                delta.live_bytes,
            );
        }
        out
    }
}
