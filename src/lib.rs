#![forbid(unsafe_code)]
//! wiretap: log inputs, timings, allocation movement, and process
//! resource usage around ordinary calls.
//!
//! The wrappers live in [`wiretap_wrap`] and the measurement sources in
//! [`wiretap_probe`]; this crate stitches them together behind one
//! import.
//!
//! ```
//! use wiretap::{CallLog, Callable, Timed};
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! let logged = Timed::new("add", CallLog::new("add", add));
//! assert_eq!(logged.call((2, 3)), 5);
//! ```
//!
//! Every event carries target `wiretap`, so an `EnvFilter` directive
//! like `wiretap=info` scopes them. The library never installs a
//! subscriber; that choice belongs to the binary.

pub use wiretap_probe as probe;
pub use wiretap_wrap as wrap;

pub use wiretap_probe::alloc::{counters_active, AllocDelta, AllocStats, CountingAlloc};
pub use wiretap_probe::process::{
    IoCounters, MemoryInfo, NetCounters, ProcessSnapshot, ResourceDelta,
};
pub use wiretap_wrap::{
    log_call, opaque_repr, timed, AllocLog, ArgRepr, Averaged, CallLog, Callable, CaptureSink,
    Detail, OnUnwind, ReprArgs, ResourceLog, Timed,
};
