//! Integration tests for port clock acceptance.
//!
//! These tests verify the port clock contract end to end:
//! - Real elapsed time lands in the counter within tolerance
//! - The counter tracks the kernel's monotonic clock
//! - Long-duration stability (soak tests, `#[ignore]`d by default)

mod clock_test;
mod common;
