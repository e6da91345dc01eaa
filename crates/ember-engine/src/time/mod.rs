//! Time subsystem.
//!
//! - one `FrameClock` per render loop, ticked once per presented frame
//! - `Timer` for ad-hoc measurements

mod frame_clock;
mod timer;

pub use frame_clock::{FrameClock, FrameTime};
pub use timer::Timer;
