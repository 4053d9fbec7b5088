//! C ABI surface for linking under a stack built as C.
//!
//! The staticlib artifact of this crate exports `sys_now` with C linkage so
//! the stack's timer core resolves it at link time, exactly as it would
//! resolve a hand-written port file. The export delegates to
//! [`crate::clock::sys_now`] and adds no state of its own.

/// C ABI entry point for the stack's timer subsystem.
///
/// Same contract as [`crate::clock::sys_now`]: milliseconds from an
/// arbitrary reference point, wrapping at `u32::MAX`. The body cannot
/// panic, so no unwind crosses the C boundary.
#[no_mangle]
pub extern "C" fn sys_now() -> u32 {
    crate::clock::sys_now()
}
