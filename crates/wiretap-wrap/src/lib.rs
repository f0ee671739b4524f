#![forbid(unsafe_code)]
//! wiretap-wrap: composable call wrappers around plain functions.
//!
//! Each wrapper owns an inner callable plus a label and implements
//! [`Callable`] itself, so wrappers nest in any order. A wrapped call
//! behaves exactly like the bare call: same output, same panic. The
//! wrappers only add `tracing` events around it, under target
//! `wiretap`.
//!
//! Under nesting, before-events run outermost-first on the way in and
//! after-events innermost-first on the way out.

pub mod alloc;
pub mod call;
pub mod capture;
pub mod guard;
pub mod inputs;
pub mod repr;
pub mod resources;
pub mod timing;

pub use alloc::AllocLog;
pub use call::Callable;
pub use capture::CaptureSink;
pub use guard::OnUnwind;
pub use inputs::CallLog;
pub use repr::{opaque_repr, ArgRepr, ReprArgs};
pub use resources::{Detail, ResourceLog};
pub use timing::{Averaged, Timed};

#[doc(hidden)]
pub use tracing as __tracing;
