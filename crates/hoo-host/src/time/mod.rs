//! Time subsystem.
//!
//! Provides frame timing that does not read the wall clock on its own:
//! - a `Clock` supplies timestamps (system clock in production, manual clock in tests)
//! - one `FrameClock` per driver turns timestamps into `FrameDelta`s

mod clock;
mod frame_clock;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame_clock::{FrameClock, FrameDelta, FrameTime};
