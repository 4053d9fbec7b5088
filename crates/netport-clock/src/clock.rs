//! The port-layer clock contract.
//!
//! A portable TCP/IP stack drives every protocol timer it owns (TCP
//! retransmission, ARP cache aging, DHCP leases, IP reassembly) from a single
//! integrator-supplied primitive: a free-running millisecond counter. This
//! module is that primitive for hosted Unix targets.
//!
//! # Contract
//!
//! - [`sys_now`] returns milliseconds since an arbitrary, platform-chosen
//!   reference point. The reference point is meaningless on its own; only
//!   differences between readings carry information.
//! - The counter is non-decreasing between in-order calls under normal
//!   operation and wraps to zero silently after `u32::MAX + 1` milliseconds
//!   (about 49.7 days). Compare readings with the helpers in [`crate::ticks`],
//!   never with direct `<` / `>`.
//! - Reads never fail, never block, and are safe from any thread.
//!
//! The platform backend is chosen at build time; see [`backend`] for what
//! was compiled in.

use crate::platform;
use crate::ticks;

/// Identity of the compiled-in clock backend.
///
/// One backend is selected per target OS at build time. Consumers that care
/// about the monotonicity guarantee (test harnesses, diagnostics) can inspect
/// [`Backend::hardware_monotonic`] instead of duplicating `cfg` logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backend {
    /// Name of the platform primitive backing the counter.
    pub name: &'static str,
    /// Whether the underlying counter is immune to wall-clock adjustments.
    ///
    /// When `false` the backend derives milliseconds from calendar time, and
    /// an administrative or NTP step that moves the system clock backwards
    /// moves this counter backwards with it. Stack timers stall until the
    /// counter passes its previous high-water mark and then recover.
    pub hardware_monotonic: bool,
}

/// The backend compiled into this build.
#[inline]
#[must_use]
pub const fn backend() -> Backend {
    platform::BACKEND
}

/// Current value of the port clock, in milliseconds.
///
/// The value wraps to zero roughly every 49.7 days; callers must use
/// wraparound-safe arithmetic ([`crate::ticks::elapsed`]) when comparing
/// readings. Sub-millisecond precision is truncated, never rounded.
///
/// This call cannot fail. Platform errors that would leave the counter
/// without a timebase are handled inside the backend (see
/// `platform::mach` for the one such case).
#[inline]
#[must_use]
pub fn sys_now() -> u32 {
    // Deliberate modular truncation: the low 32 bits are the counter.
    platform::now_ms() as u32
}

/// Wraparound-safe milliseconds elapsed since `earlier`.
///
/// Shorthand for `ticks::elapsed(earlier, sys_now())`, the pattern timer
/// code uses to age an entry against its stored timestamp. The result is
/// meaningful as long as the real interval is at most
/// [`ticks::MAX_DELTA`] milliseconds.
#[inline]
#[must_use]
pub fn millis_since(earlier: u32) -> u32 {
    ticks::elapsed(earlier, sys_now())
}
