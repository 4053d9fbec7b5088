//! Build-time selected clock backends.
//!
//! Exactly one backend is compiled in, keyed on the target OS. A backend
//! supplies `now_ms() -> u64` (milliseconds since its own reference point,
//! sub-millisecond remainder truncated) and a `BACKEND` descriptor.
//! Unsupported targets are rejected at compile time rather than silently
//! returning a stuck counter.

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod mach;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) use mach::{now_ms, BACKEND};

#[cfg(any(target_os = "linux", target_os = "android"))]
mod posix;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) use posix::{now_ms, BACKEND};

#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "linux",
    target_os = "android",
)))]
compile_error!(
    "netport-clock has no clock backend for this target OS; \
     add one under src/platform/ and wire it up in platform/mod.rs"
);
