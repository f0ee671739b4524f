//! Duration logging.
//!
//! [`Timed`] logs one elapsed line per call. [`Averaged`] repeats the
//! call, logs every run, and closes with the mean; arguments must be
//! `Clone` because each run gets its own copy, and the final run's
//! output is the one returned.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::call::Callable;
use crate::guard::OnUnwind;

/// Logs the wall-clock duration of each call.
pub struct Timed<F> {
    label: &'static str,
    inner: F,
}

impl<F> Timed<F> {
    pub fn new(label: &'static str, inner: F) -> Self {
        Self { label, inner }
    }
}

impl<F, Args> Callable<Args> for Timed<F>
where
    F: Callable<Args>,
{
    type Output = F::Output;

    fn call(&self, args: Args) -> F::Output {
        let (out, _) = run_logged(self.label, 1, &self.inner, args);
        out
    }
}

/// Repeats the call `runs` times, logging each run and the average.
pub struct Averaged<F> {
    label: &'static str,
    runs: NonZeroUsize,
    inner: F,
}

impl<F> Averaged<F> {
    pub fn new(label: &'static str, runs: NonZeroUsize, inner: F) -> Self {
        Self { label, runs, inner }
    }
}

impl<F, Args> Callable<Args> for Averaged<F>
where
    F: Callable<Args>,
    Args: Clone,
{
    type Output = F::Output;

    fn call(&self, args: Args) -> F::Output {
        let runs = self.runs.get();
        let mut total = Duration::ZERO;
        for run in 1..runs {
            let (_, elapsed) = run_logged(self.label, run, &self.inner, args.clone());
            total += elapsed;
        }
        let (out, elapsed) = run_logged(self.label, runs, &self.inner, args);
        total += elapsed;
        if runs > 1 {
            tracing::info!(
                target: "wiretap",
                function = self.label,
                "Average execution time of {}: {:.6} seconds",
                self.label,
                (total / runs as u32).as_secs_f64(),
            );
        }
        out
    }
}

/// One timed invocation with its log line; on panic the guard reports
/// the elapsed time instead.
fn run_logged<F, Args>(
    label: &'static str,
    run: usize,
    inner: &F,
    args: Args,
) -> (F::Output, Duration)
where
    F: Callable<Args>,
{
    let start = Instant::now();
    let _guard = OnUnwind::new(|| {
        tracing::warn!(
            target: "wiretap",
            function = label,
            "{} panicked during execution {} after {:.6} seconds",
            label,
            run,
            start.elapsed().as_secs_f64(),
        );
    });
    let out = inner.call(args);
    let elapsed = start.elapsed();
    tracing::info!(
        target: "wiretap",
        function = label,
        "Execution {} of {}: {:.6} seconds",
        run,
        label,
        elapsed.as_secs_f64(),
    );
    (out, elapsed)
}

/// Time an expression under a caller-chosen label.
///
/// ```
/// # use wiretap_wrap::timed;
/// let sum = timed!("sum", (1..=100).sum::<i32>());
/// assert_eq!(sum, 5050);
/// ```
#[macro_export]
macro_rules! timed {
    ($label:expr, $expr:expr) => {{
        let __start = ::std::time::Instant::now();
        let __out = $expr;
        $crate::__tracing::info!(
            target: "wiretap",
            "Execution 1 of {}: {:.6} seconds",
            $label,
            __start.elapsed().as_secs_f64(),
        );
        __out
    }};
}
