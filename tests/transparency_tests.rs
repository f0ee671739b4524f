//! Wrapped calls must behave exactly like bare calls: same outputs,
//! same panics, in any nesting order.

use std::num::NonZeroUsize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use wiretap::{AllocLog, Averaged, CallLog, Callable, ResourceLog, Timed};

fn add(a: i32, b: i32) -> i32 {
    a + b
}

fn concat(prefix: &str, n: u32) -> String {
    format!("{prefix}-{n}")
}

#[test]
fn test_wrapped_output_matches_bare_output() {
    let logged = CallLog::new("add", add);
    assert_eq!(logged.call((2, 3)), add(2, 3));
    assert_eq!(logged.call((10, -4)), 6);
}

#[test]
fn test_wrappers_nest_in_any_order() {
    let stacked = Timed::new("add", CallLog::new("add", add));
    assert_eq!(stacked.call((2, 3)), 5);

    let stacked = CallLog::new("add", AllocLog::new("add", Timed::new("add", add)));
    assert_eq!(stacked.call((2, 3)), 5);

    let stacked = ResourceLog::new("add", AllocLog::new("add", add));
    assert_eq!(stacked.call((2, 3)), 5);
}

#[test]
fn test_closures_keep_their_captures() {
    let offset = 100;
    let bump = move |x: i32| x + offset;
    let logged = CallLog::new("bump", bump);
    assert_eq!(logged.call((1,)), 101);
}

#[test]
fn test_heap_outputs_pass_through() {
    let wrapped = Timed::new("concat", CallLog::new("concat", concat));
    assert_eq!(wrapped.call(("job", 7)), "job-7");
}

#[test]
fn test_zero_argument_calls() {
    let answer = || 42u8;
    let wrapped = Timed::new("answer", CallLog::new("answer", &answer));
    assert_eq!(wrapped.call(()), 42);
}

#[test]
fn test_panics_propagate_with_their_payload() {
    let explode = |n: i32| -> i32 { panic!("boom {n}") };
    let wrapped = Timed::new("explode", CallLog::new("explode", &explode));

    let err = catch_unwind(AssertUnwindSafe(|| wrapped.call((3,)))).unwrap_err();
    let message = err.downcast_ref::<String>().cloned().unwrap_or_default();
    assert!(message.contains("boom 3"), "payload was: {message}");
}

#[test]
fn test_averaged_returns_the_final_run() {
    let calls = AtomicUsize::new(0);
    let next = |base: usize| base + calls.fetch_add(1, Ordering::SeqCst);
    let averaged = Averaged::new("next", NonZeroUsize::new(3).unwrap(), &next);

    // Three runs; the returned value is from the last one.
    assert_eq!(averaged.call((10,)), 12);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_single_run_average_behaves_like_timed() {
    let averaged = Averaged::new("add", NonZeroUsize::new(1).unwrap(), add);
    assert_eq!(averaged.call((2, 2)), 4);
}

#[test]
fn test_concurrent_invocations_stay_independent() {
    use std::sync::Arc;
    use std::thread;

    let wrapped = Arc::new(Timed::new("add", CallLog::new("add", add)));
    let mut handles = vec![];
    for i in 0..8 {
        let wrapped = Arc::clone(&wrapped);
        handles.push(thread::spawn(move || wrapped.call((i, i))));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let got = handle.join().expect("thread panicked");
        assert_eq!(got, (i as i32) * 2);
    }
}
