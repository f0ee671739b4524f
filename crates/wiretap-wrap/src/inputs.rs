//! Input logging: one event per call with the arguments rendered.

use crate::call::Callable;
use crate::repr::ReprArgs;

/// Logs `Calling label(args...)` before delegating to the inner call.
pub struct CallLog<F> {
    label: &'static str,
    inner: F,
}

impl<F> CallLog<F> {
    pub fn new(label: &'static str, inner: F) -> Self {
        Self { label, inner }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<F, Args> Callable<Args> for CallLog<F>
where
    F: Callable<Args>,
    Args: ReprArgs,
{
    type Output = F::Output;

    fn call(&self, args: Args) -> F::Output {
        tracing::info!(
            target: "wiretap",
            function = self.label,
            "Calling {}({})",
            self.label,
            args.repr_args(),
        );
        self.inner.call(args)
    }
}

/// Wrap-and-invoke convenience: logs the call under the callee's own
/// name, then invokes it once.
///
/// ```
/// # use wiretap_wrap::log_call;
/// fn add(a: i32, b: i32) -> i32 {
///     a + b
/// }
/// assert_eq!(log_call!(add, 2, 3), 5);
/// ```
#[macro_export]
macro_rules! log_call {
    ($func:expr $(, $arg:expr)* $(,)?) => {{
        let __wrapped = $crate::inputs::CallLog::new(stringify!($func), &$func);
        $crate::call::Callable::call(&__wrapped, ($($arg,)*))
    }};
}
