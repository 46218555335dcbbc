//! ### English
//! Frame pacing for the pump thread.
//!
//! Caps production to a fixed interval; never forces faster-than-real-time iteration.
//!
//! ### 中文
//! 帧泵线程的帧节奏控制。
//!
//! 将生产速率限制在固定间隔内；从不强制快于真实时间的迭代。
mod clock;
mod fixed_interval;

pub use clock::{Clock, SystemClock};
pub(crate) use fixed_interval::FrameLimiter;

#[cfg(test)]
pub(crate) use clock::ManualClock;
