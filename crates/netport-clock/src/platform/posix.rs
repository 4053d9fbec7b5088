//! Time-of-day clock backend for Linux and Android.
//!
//! Reads `gettimeofday` and normalizes seconds and microseconds to
//! milliseconds since the POSIX epoch. The time-of-day clock is not a
//! dedicated monotonic source: an administrative or NTP step that moves the
//! system clock backwards moves this counter backwards with it. The port
//! accepts that trade for parity with the reference behavior; stack timers
//! stall across a backward step and recover once the counter passes its
//! previous high-water mark.

use libc::{gettimeofday, timeval};

use crate::clock::Backend;

pub(crate) const BACKEND: Backend = Backend {
    name: "gettimeofday",
    hardware_monotonic: false,
};

/// Milliseconds per second.
const MS_PER_SEC: u64 = 1_000;
/// Microseconds per millisecond.
const US_PER_MS: u64 = 1_000;

/// Milliseconds since the POSIX epoch, truncated.
pub(crate) fn now_ms() -> u64 {
    let mut tv = timeval {
        tv_sec: 0,
        tv_usec: 0,
    };

    // SAFETY: `tv` is a valid, writable timeval and a null timezone is
    // permitted; gettimeofday cannot fail with these arguments
    unsafe {
        gettimeofday(&mut tv, std::ptr::null_mut());
    }

    (tv.tv_sec as u64) * MS_PER_SEC + (tv.tv_usec as u64) / US_PER_MS
}
