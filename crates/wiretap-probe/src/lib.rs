#![deny(unsafe_code)]
//! wiretap-probe: allocation counters and process resource snapshots.
//!
//! This crate is the *measurement* half of wiretap: a counting global
//! allocator and point-in-time `/proc` snapshots. It never logs; the
//! wrappers in `wiretap-wrap` decide what to emit and when.
//!
//! The allocator hooks run inside `GlobalAlloc`, so everything on that
//! path is plain relaxed atomics. Snapshot reads are buffered file
//! reads that return `Result` and leave policy to the caller.

pub mod alloc;
pub mod error;
pub mod process;

pub use alloc::{counters_active, AllocDelta, AllocStats, CountingAlloc};
pub use process::{IoCounters, MemoryInfo, NetCounters, ProcessSnapshot, ResourceDelta};
