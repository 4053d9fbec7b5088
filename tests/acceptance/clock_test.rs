//! Port clock contract tests.
//!
//! Each test measures the counter against an independent host clock:
//! `Instant` bounds the busy-wait windows and CLOCK_MONOTONIC provides the
//! reference deltas. Bands are wide enough to absorb scheduler noise on a
//! loaded machine but tight enough to catch a mis-scaled backend (seconds
//! or microseconds instead of milliseconds) immediately.

use std::time::{Duration, Instant};

use netport_clock::{millis_since, sys_now, ticks};

use super::common::{busy_wait, reference_monotonic_ms, DriftBudget};

/// A busy-waited 50ms window must appear in the counter as 40..=70ms.
#[test]
fn test_fifty_ms_window_lands_in_band() {
    // Tightest of three windows keeps a single preemption between the
    // busy-wait and the second read from failing the run
    let delta = (0..3)
        .map(|_| {
            let t0 = sys_now();
            busy_wait(Duration::from_millis(50));
            let t1 = sys_now();
            ticks::elapsed(t0, t1)
        })
        .min()
        .unwrap();

    assert!(
        (40..=70).contains(&delta),
        "50ms busy-wait measured as {delta}ms"
    );
}

/// Counter and CLOCK_MONOTONIC must cover the same 400ms window.
#[test]
fn test_tracks_kernel_monotonic_reference() {
    let budget = DriftBudget::default();

    let ref0 = reference_monotonic_ms();
    let t0 = sys_now();
    busy_wait(Duration::from_millis(400));
    let t1 = sys_now();
    let ref1 = reference_monotonic_ms();

    let counter_ms = ticks::elapsed(t0, t1);
    let reference_ms = ref1 - ref0;

    assert!(
        budget.check(counter_ms, reference_ms),
        "counter covered {counter_ms}ms while reference covered {reference_ms}ms \
         (allowance {}ms)",
        budget.allowance_ms(reference_ms)
    );
}

/// In-order reads never move backwards within a tight loop.
#[test]
fn test_in_order_reads_never_go_backwards() {
    let deadline = Instant::now() + Duration::from_millis(100);
    let mut prev = sys_now();
    let mut reads = 0u64;

    while Instant::now() < deadline {
        let cur = sys_now();
        assert!(
            !ticks::is_before(cur, prev),
            "counter went backwards: {prev} -> {cur} after {reads} reads"
        );
        prev = cur;
        reads += 1;
    }

    // The loop must actually have hammered the clock
    assert!(reads > 1_000, "only {reads} reads in 100ms");
}

/// The aging pattern timer code uses: stamp an event, wait, measure age.
#[test]
fn test_timestamp_aging_pattern() {
    let stamp = sys_now();
    busy_wait(Duration::from_millis(25));

    let age = millis_since(stamp);
    assert!((20..=60).contains(&age), "25ms-old stamp aged {age}ms");
}
