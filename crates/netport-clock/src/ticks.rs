//! Wraparound-safe arithmetic over the millisecond counter.
//!
//! The counter returned by [`crate::sys_now`] lives on a circle of
//! `u32::MAX + 1` milliseconds. Differences and ordering are therefore
//! computed modulo 2^32, and a delta is only meaningful while the real
//! interval stays at or below [`MAX_DELTA`]. Timer code that checks its
//! deadlines at least once per [`MAX_DELTA`] window never observes an
//! ambiguous value.
//!
//! All helpers are `const fn` so deadline tables can be built at
//! compile time.

use static_assertions::const_assert;

/// Longest interval, in milliseconds, that a wrapped counter delta can
/// represent unambiguously (just under 24.9 days).
pub const MAX_DELTA: u32 = u32::MAX / 2;

// Ordering splits the counter circle into two equal halves around MAX_DELTA.
const_assert!(MAX_DELTA == 0x7FFF_FFFF);

/// Milliseconds from `earlier` to `later`, correct across counter wrap.
///
/// Two's-complement subtraction makes a single wrap between the readings
/// invisible:
///
/// ```
/// use netport_clock::ticks::elapsed;
///
/// // 16 ticks before wrap, then 16 ticks after
/// assert_eq!(elapsed(0xFFFF_FFF0, 0x0000_0010), 0x20);
/// assert_eq!(elapsed(7, 7), 0);
/// ```
///
/// If more than one full wrap (about 49.7 days) passes between the
/// readings the result aliases and cannot be detected here.
#[inline]
#[must_use]
pub const fn elapsed(earlier: u32, later: u32) -> u32 {
    later.wrapping_sub(earlier)
}

/// Wrap-aware ordering: `true` when `a` precedes `b` by no more than
/// [`MAX_DELTA`] milliseconds.
///
/// Readings exactly half the circle apart are ambiguous and order as
/// neither-before: `is_before(a, b)` and `is_before(b, a)` are then both
/// `false`, as they are for equal readings.
#[inline]
#[must_use]
pub const fn is_before(a: u32, b: u32) -> bool {
    let delta = b.wrapping_sub(a);
    delta != 0 && delta <= MAX_DELTA
}
