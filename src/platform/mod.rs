//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock in milliseconds)
//! - Input events (DOM key codes)

pub mod input;
pub mod time;

pub use input::Key;
pub use time::{Clock, ManualClock, SystemClock};
