#![doc = "OS port layer clock for a portable TCP/IP stack."]

pub mod clock;
pub mod ffi;
pub mod ticks;

mod platform;

pub use clock::*;
pub use ticks::*;
