//! Absolute-time clock backend for Darwin (macOS and iOS).
//!
//! `mach_absolute_time` counts opaque hardware ticks from boot and is not
//! affected by wall-clock adjustments. The `numer / denom` ratio from
//! `mach_timebase_info` converts ticks to nanoseconds; the ratio is fixed
//! for the life of the process, so it is queried once and cached instead
//! of on every read.

use std::sync::OnceLock;

use libc::{mach_absolute_time, mach_timebase_info};
use tracing::{debug, warn};

use crate::clock::Backend;

pub(crate) const BACKEND: Backend = Backend {
    name: "mach_absolute_time",
    hardware_monotonic: true,
};

/// Nanoseconds per millisecond.
const NANOS_PER_MS: u128 = 1_000_000;

/// Cached tick-to-nanosecond ratio.
static TIMEBASE: OnceLock<(u32, u32)> = OnceLock::new();

fn timebase() -> (u32, u32) {
    *TIMEBASE.get_or_init(|| {
        let mut info = mach_timebase_info { numer: 0, denom: 0 };

        // SAFETY: `info` is a valid, writable mach_timebase_info
        let ret = unsafe { mach_timebase_info(&mut info) };

        if ret != 0 || info.denom == 0 {
            // Not observed on any shipping Darwin; fall back to treating
            // ticks as nanoseconds rather than dividing by zero
            warn!(ret, "mach_timebase_info failed, assuming 1:1 timebase");
            return (1, 1);
        }

        debug!(
            numer = info.numer,
            denom = info.denom,
            "cached mach timebase ratio"
        );
        (info.numer, info.denom)
    })
}

/// Convert absolute ticks to milliseconds with a `numer/denom` timebase.
///
/// Widened to `u128` before scaling: `ticks * numer` overflows `u64` on
/// timebases where `numer > 1` (Apple silicon reports 125/3) once uptime
/// is long.
fn scale_to_ms(ticks: u64, numer: u32, denom: u32) -> u64 {
    let nanos = u128::from(ticks) * u128::from(numer) / u128::from(denom);
    (nanos / NANOS_PER_MS) as u64
}

/// Milliseconds since boot, truncated.
pub(crate) fn now_ms() -> u64 {
    // SAFETY: mach_absolute_time reads a hardware counter and cannot fail
    let ticks = unsafe { mach_absolute_time() };
    let (numer, denom) = timebase();
    scale_to_ms(ticks, numer, denom)
}
