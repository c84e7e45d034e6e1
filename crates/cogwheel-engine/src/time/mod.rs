//! Time subsystem.
//!
//! Provides testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - feed `FrameTime::now` to a `FrameRateMeter` for periodic FPS reports

mod frame_clock;
mod frame_rate;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_rate::{FrameRateMeter, FrameRateReport};
