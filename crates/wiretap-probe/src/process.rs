//! Point-in-time process resource snapshots from `/proc`.
//!
//! Memory comes from `/proc/self/status` and is required. CPU time,
//! disk I/O, and network totals degrade to `None` when their source is
//! missing or unreadable: containers often mask `/proc/self/io`, and
//! the network counters are system-wide rather than per-process.
//!
//! Parsers take `&str` so fixtures can drive them in tests.

use std::fs;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};

const PROC_STATUS: &str = "/proc/self/status";
const PROC_SCHEDSTAT: &str = "/proc/self/schedstat";
const PROC_IO: &str = "/proc/self/io";
const PROC_NET_DEV: &str = "/proc/net/dev";

/// Process memory sizes, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    /// Resident set size (`VmRSS`).
    pub rss_bytes: u64,
    /// Virtual memory size (`VmSize`).
    pub vms_bytes: u64,
    /// Resident high-water mark (`VmHWM`); falls back to `rss_bytes` on
    /// kernels that omit the line.
    pub peak_rss_bytes: u64,
}

/// Storage I/O issued by this process (`/proc/self/io`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IoCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Byte totals summed over every interface in `/proc/net/dev`,
/// loopback included. System-wide, not per-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetCounters {
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

/// One capture of the process's resource counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessSnapshot {
    pub memory: MemoryInfo,
    /// Time spent on CPU (`/proc/self/schedstat`, first field).
    pub cpu_time: Option<Duration>,
    pub disk: Option<IoCounters>,
    pub net: Option<NetCounters>,
}

impl ProcessSnapshot {
    /// Capture everything: memory, CPU time, disk, and network.
    pub fn capture() -> Result<Self> {
        let memory = read_memory()?;
        Ok(Self {
            memory,
            cpu_time: read_cpu_time(),
            disk: read_disk(),
            net: read_net(),
        })
    }

    /// Memory and CPU time only; skips the disk and network sources.
    pub fn capture_basic() -> Result<Self> {
        let memory = read_memory()?;
        Ok(Self {
            memory,
            cpu_time: read_cpu_time(),
            disk: None,
            net: None,
        })
    }

    /// Movement from `earlier` to `self`. Optional counters yield
    /// `None` unless both snapshots carry them.
    pub fn delta_since(&self, earlier: &ProcessSnapshot) -> ResourceDelta {
        let disk = self.disk.zip(earlier.disk);
        let net = self.net.zip(earlier.net);
        ResourceDelta {
            rss_bytes: signed(self.memory.rss_bytes, earlier.memory.rss_bytes),
            vms_bytes: signed(self.memory.vms_bytes, earlier.memory.vms_bytes),
            peak_rss_bytes: signed(self.memory.peak_rss_bytes, earlier.memory.peak_rss_bytes),
            cpu_time: self
                .cpu_time
                .zip(earlier.cpu_time)
                .map(|(after, before)| after.saturating_sub(before)),
            disk_read_bytes: disk.map(|(a, b)| a.read_bytes.saturating_sub(b.read_bytes)),
            disk_write_bytes: disk.map(|(a, b)| a.write_bytes.saturating_sub(b.write_bytes)),
            net_bytes_received: net.map(|(a, b)| a.bytes_received.saturating_sub(b.bytes_received)),
            net_bytes_sent: net.map(|(a, b)| a.bytes_sent.saturating_sub(b.bytes_sent)),
        }
    }
}

/// Movement between two [`ProcessSnapshot`] captures. Memory deltas are
/// signed; the kernel can shrink RSS and VMS mid-call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceDelta {
    pub rss_bytes: i64,
    pub vms_bytes: i64,
    pub peak_rss_bytes: i64,
    pub cpu_time: Option<Duration>,
    pub disk_read_bytes: Option<u64>,
    pub disk_write_bytes: Option<u64>,
    pub net_bytes_received: Option<u64>,
    pub net_bytes_sent: Option<u64>,
}

fn signed(after: u64, before: u64) -> i64 {
    after as i64 - before as i64
}

fn malformed(path: &'static str, detail: impl Into<String>) -> Error {
    Error::Parse {
        path,
        detail: detail.into(),
    }
}

fn read_memory() -> Result<MemoryInfo> {
    let text = fs::read_to_string(PROC_STATUS).map_err(|source| Error::Read {
        path: PROC_STATUS,
        source,
    })?;
    parse_status(&text)
}

fn read_cpu_time() -> Option<Duration> {
    let text = fs::read_to_string(PROC_SCHEDSTAT).ok()?;
    parse_schedstat(&text).ok()
}

fn read_disk() -> Option<IoCounters> {
    let text = fs::read_to_string(PROC_IO).ok()?;
    parse_io(&text).ok()
}

fn read_net() -> Option<NetCounters> {
    let text = fs::read_to_string(PROC_NET_DEV).ok()?;
    parse_net_dev(&text).ok()
}

fn parse_status(text: &str) -> Result<MemoryInfo> {
    let mut rss = None;
    let mut vms = None;
    let mut peak = None;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            rss = Some(parse_kb("VmRSS", rest)?);
        } else if let Some(rest) = line.strip_prefix("VmSize:") {
            vms = Some(parse_kb("VmSize", rest)?);
        } else if let Some(rest) = line.strip_prefix("VmHWM:") {
            peak = Some(parse_kb("VmHWM", rest)?);
        }
    }
    let rss = rss.ok_or_else(|| malformed(PROC_STATUS, "missing VmRSS"))?;
    let vms = vms.ok_or_else(|| malformed(PROC_STATUS, "missing VmSize"))?;
    Ok(MemoryInfo {
        rss_bytes: rss,
        vms_bytes: vms,
        peak_rss_bytes: peak.unwrap_or(rss),
    })
}

/// Parse a `  1234 kB` status value into bytes.
fn parse_kb(field: &'static str, rest: &str) -> Result<u64> {
    let digits = rest.trim().trim_end_matches("kB").trim_end();
    digits
        .parse::<u64>()
        .map(|kb| kb * 1024)
        .map_err(|_| malformed(PROC_STATUS, format!("bad {field} value: {rest:?}")))
}

/// First field of `/proc/self/schedstat` is time on CPU in nanoseconds.
fn parse_schedstat(text: &str) -> Result<Duration> {
    let first = text
        .split_whitespace()
        .next()
        .ok_or_else(|| malformed(PROC_SCHEDSTAT, "empty file"))?;
    let nanos = first
        .parse::<u64>()
        .map_err(|_| malformed(PROC_SCHEDSTAT, format!("bad cpu time: {first:?}")))?;
    Ok(Duration::from_nanos(nanos))
}

fn parse_io(text: &str) -> Result<IoCounters> {
    let mut read_bytes = None;
    let mut write_bytes = None;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("read_bytes:") {
            read_bytes = Some(parse_count(PROC_IO, "read_bytes", rest)?);
        } else if let Some(rest) = line.strip_prefix("write_bytes:") {
            write_bytes = Some(parse_count(PROC_IO, "write_bytes", rest)?);
        }
    }
    match (read_bytes, write_bytes) {
        (Some(read_bytes), Some(write_bytes)) => Ok(IoCounters {
            read_bytes,
            write_bytes,
        }),
        _ => Err(malformed(PROC_IO, "missing read_bytes/write_bytes")),
    }
}

/// Sum receive/transmit byte columns across every interface row. The
/// two header lines are skipped; rx bytes is the first counter after
/// the interface name, tx bytes the ninth.
fn parse_net_dev(text: &str) -> Result<NetCounters> {
    let mut bytes_received = 0u64;
    let mut bytes_sent = 0u64;
    let mut rows = 0usize;
    for line in text.lines().skip(2) {
        let counters = match line.split_once(':') {
            Some((_, rest)) => rest,
            None => continue,
        };
        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 9 {
            return Err(malformed(PROC_NET_DEV, format!("short row: {line:?}")));
        }
        bytes_received += parse_count(PROC_NET_DEV, "rx bytes", fields[0])?;
        bytes_sent += parse_count(PROC_NET_DEV, "tx bytes", fields[8])?;
        rows += 1;
    }
    if rows == 0 {
        return Err(malformed(PROC_NET_DEV, "no interface rows"));
    }
    Ok(NetCounters {
        bytes_received,
        bytes_sent,
    })
}

fn parse_count(path: &'static str, field: &str, rest: &str) -> Result<u64> {
    rest.trim()
        .parse::<u64>()
        .map_err(|_| malformed(path, format!("bad {field}: {rest:?}")))
}
