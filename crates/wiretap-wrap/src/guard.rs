//! Unwind-only drop guard.
//!
//! [`OnUnwind`] runs its closure from `Drop`, and only while the thread
//! is panicking. The wrappers use it to get a partial after-event out
//! when the wrapped call panics, without touching the normal path.

/// Runs `on_panic` from `Drop` if the thread is unwinding.
///
/// The closure must not panic itself; a panic while unwinding aborts
/// the process.
pub struct OnUnwind<F: FnMut()> {
    on_panic: F,
}

impl<F: FnMut()> OnUnwind<F> {
    pub fn new(on_panic: F) -> Self {
        Self { on_panic }
    }
}

impl<F: FnMut()> Drop for OnUnwind<F> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            (self.on_panic)();
        }
    }
}
