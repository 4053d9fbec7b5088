//! Common utilities for integration tests.
//!
//! Provides helpers for:
//! - Busy-waiting precise windows on the host clock
//! - Reading an independent monotonic reference (CLOCK_MONOTONIC)
//! - Expressing drift tolerances as acceptance criteria

use std::time::{Duration, Instant};

/// Spin until `d` has elapsed on the host's monotonic clock.
///
/// Busy-waiting keeps the measurement window tight; `sleep` would add
/// scheduler wakeup latency to both edges of the window.
pub fn busy_wait(d: Duration) {
    let start = Instant::now();
    while start.elapsed() < d {
        std::hint::spin_loop();
    }
}

/// Milliseconds from the kernel's CLOCK_MONOTONIC.
///
/// Deliberately bypasses the crate under test so comparisons run against
/// the kernel's own idea of monotonic time.
pub fn reference_monotonic_ms() -> u64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };

    // SAFETY: `ts` is a valid, writable timespec; CLOCK_MONOTONIC exists
    // on every supported kernel
    unsafe {
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
    }

    ts.tv_sec as u64 * 1_000 + ts.tv_nsec as u64 / 1_000_000
}

/// Acceptance bounds for comparing the counter against a reference window.
pub struct DriftBudget {
    /// Fixed allowance for read placement and truncation, in ms.
    pub fixed_ms: u32,
    /// Proportional allowance, in parts per thousand of the window.
    pub per_mille: u32,
}

impl Default for DriftBudget {
    fn default() -> Self {
        Self {
            fixed_ms: 10,
            per_mille: 5,
        }
    }
}

impl DriftBudget {
    /// Maximum tolerated |counter - reference| for a `window_ms` window.
    pub fn allowance_ms(&self, window_ms: u64) -> u64 {
        u64::from(self.fixed_ms) + window_ms * u64::from(self.per_mille) / 1_000
    }

    /// Check a counter delta against a reference delta.
    pub fn check(&self, counter_ms: u32, reference_ms: u64) -> bool {
        let diff = (i64::from(counter_ms) - reference_ms as i64).unsigned_abs();
        diff <= self.allowance_ms(reference_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_wait_reaches_target() {
        let start = Instant::now();
        busy_wait(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_reference_monotonic_nondecreasing() {
        let a = reference_monotonic_ms();
        let b = reference_monotonic_ms();
        assert!(b >= a);
        assert!(a > 0);
    }

    #[test]
    fn test_drift_budget_allowance_scales() {
        let budget = DriftBudget::default();
        assert_eq!(budget.allowance_ms(0), 10);
        assert_eq!(budget.allowance_ms(10_000), 60);

        assert!(budget.check(1_000, 1_005));
        assert!(budget.check(1_005, 1_000));
        assert!(!budget.check(1_000, 2_000));
    }
}
