//! Resource usage logging around a call.
//!
//! Snapshots come from `wiretap-probe`. A failed snapshot downgrades to
//! a warn event and the call runs unmeasured; measurement never changes
//! what the call returns or whether it panics.

use std::time::{Duration, Instant};

use wiretap_probe::process::ProcessSnapshot;

use crate::call::Callable;
use crate::guard::OnUnwind;

/// How much to capture and log per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    /// CPU time and virtual-memory movement on one line.
    Basic,
    /// Adds RSS, disk I/O, and network counters on separate lines.
    Detailed,
}

/// Logs process resource movement across each call.
pub struct ResourceLog<F> {
    label: &'static str,
    detail: Detail,
    inner: F,
}

impl<F> ResourceLog<F> {
    /// Single-line summary per call.
    pub fn new(label: &'static str, inner: F) -> Self {
        Self {
            label,
            detail: Detail::Basic,
            inner,
        }
    }

    /// Multi-line breakdown per call.
    pub fn detailed(label: &'static str, inner: F) -> Self {
        Self {
            label,
            detail: Detail::Detailed,
            inner,
        }
    }

    fn emit(&self, before: &ProcessSnapshot, after: &ProcessSnapshot, wall: Duration) {
        let delta = after.delta_since(before);
        match self.detail {
            Detail::Basic => {
                tracing::info!(
                    target: "wiretap",
                    function = self.label,
                    "Resource usage for {}: CPU: {}, Memory: {:+} bytes (VMS)",
                    self.label,
                    fmt_cpu(delta.cpu_time, wall),
                    delta.vms_bytes,
                );
            }
            Detail::Detailed => {
                tracing::info!(
                    target: "wiretap",
                    function = self.label,
                    "Detailed resource usage for {}:",
                    self.label,
                );
                tracing::info!(
                    target: "wiretap",
                    function = self.label,
                    "CPU usage: {}",
                    fmt_cpu(delta.cpu_time, wall),
                );
                tracing::info!(
                    target: "wiretap",
                    function = self.label,
                    "Execution time: {:.6} seconds",
                    wall.as_secs_f64(),
                );
                tracing::info!(
                    target: "wiretap",
                    function = self.label,
                    "Memory usage: RSS={:+} bytes, VMS={:+} bytes (peak RSS {} bytes)",
                    delta.rss_bytes,
                    delta.vms_bytes,
                    after.memory.peak_rss_bytes,
                );
                match delta.disk_read_bytes.zip(delta.disk_write_bytes) {
                    Some((read, write)) => tracing::info!(
                        target: "wiretap",
                        function = self.label,
                        "Disk I/O: read={} bytes, write={} bytes",
                        read,
                        write,
                    ),
                    None => tracing::debug!(
                        target: "wiretap",
                        function = self.label,
                        "Disk I/O: unavailable",
                    ),
                }
                match delta.net_bytes_sent.zip(delta.net_bytes_received) {
                    Some((sent, received)) => tracing::info!(
                        target: "wiretap",
                        function = self.label,
                        "Network I/O: sent={} bytes, received={} bytes",
                        sent,
                        received,
                    ),
                    None => tracing::debug!(
                        target: "wiretap",
                        function = self.label,
                        "Network I/O: unavailable",
                    ),
                }
            }
        }
    }
}

impl<F, Args> Callable<Args> for ResourceLog<F>
where
    F: Callable<Args>,
{
    type Output = F::Output;

    fn call(&self, args: Args) -> F::Output {
        let before = snapshot(self.detail);
        let start = Instant::now();
        let _guard = OnUnwind::new(|| {
            tracing::warn!(
                target: "wiretap",
                function = self.label,
                "{} panicked after {:.6} seconds; resource log skipped",
                self.label,
                start.elapsed().as_secs_f64(),
            );
        });
        let out = self.inner.call(args);
        let wall = start.elapsed();
        if let Some(before) = before.as_ref() {
            if let Some(after) = snapshot(self.detail) {
                self.emit(before, &after, wall);
            }
        }
        out
    }
}

fn snapshot(detail: Detail) -> Option<ProcessSnapshot> {
    let captured = match detail {
        Detail::Basic => ProcessSnapshot::capture_basic(),
        Detail::Detailed => ProcessSnapshot::capture(),
    };
    match captured {
        Ok(snap) => Some(snap),
        Err(err) => {
            tracing::warn!(
                target: "wiretap",
                error = %err,
                "resource snapshot failed; call runs unmeasured"
            );
            None
        }
    }
}

fn fmt_cpu(cpu: Option<Duration>, wall: Duration) -> String {
    match cpu {
        Some(cpu) => {
            let pct = if wall.as_secs_f64() > 0.0 {
                cpu.as_secs_f64() / wall.as_secs_f64() * 100.0
            } else {
                0.0
            };
            format!("{:.1}% ({:.6}s on CPU)", pct, cpu.as_secs_f64())
        }
        None => "unavailable".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_formatting_handles_missing_counters() {
        assert_eq!(fmt_cpu(None, Duration::from_millis(5)), "unavailable");

        let rendered = fmt_cpu(Some(Duration::from_millis(5)), Duration::from_millis(10));
        assert!(rendered.starts_with("50.0%"), "got: {rendered}");
    }

    #[test]
    fn output_passes_through_regardless_of_platform() {
        let square = |x: u64| x * x;
        let wrapped = ResourceLog::new("square", &square);
        assert_eq!(wrapped.call((9,)), 81);
    }
}
