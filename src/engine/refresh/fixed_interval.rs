use std::time::{Duration, Instant};

use super::clock::{Clock, SystemClock};

/// ### English
/// Timing of one pump iteration, returned by `FrameLimiter::begin_frame`.
///
/// ### 中文
/// 单次帧泵迭代的时间信息，由 `FrameLimiter::begin_frame` 返回。
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameTick {
    /// ### English
    /// Timestamp taken after any rate-limiting sleep; becomes the next last-tick time.
    ///
    /// ### 中文
    /// 限速睡眠之后取得的时间戳；会成为下一次的 last-tick 时间。
    pub now: Instant,
    /// ### English
    /// Time since the previous iteration, passed to the widget renderer.
    ///
    /// ### 中文
    /// 距上一次迭代的时间，传给 widget 渲染器。
    pub elapsed: Duration,
}

/// ### English
/// Fixed-interval limiter owned exclusively by the pump thread.
///
/// ### 中文
/// 由帧泵线程独占的固定间隔限速器。
pub(crate) struct FrameLimiter<C: Clock = SystemClock> {
    /// ### English
    /// Time source (wall clock in production).
    ///
    /// ### 中文
    /// 时间源（生产环境下为真实时钟）。
    clock: C,
    /// ### English
    /// Target interval, fixed at construction.
    ///
    /// ### 中文
    /// 目标间隔，构造时固定。
    interval: Duration,
    /// ### English
    /// Timestamp of the previous iteration.
    ///
    /// ### 中文
    /// 上一次迭代的时间戳。
    last_tick: Instant,
}

impl<C: Clock> FrameLimiter<C> {
    /// ### English
    /// Creates a limiter whose first iteration is measured from now.
    ///
    /// ### 中文
    /// 创建限速器；第一次迭代从当前时刻开始计时。
    pub(crate) fn new(clock: C, interval: Duration) -> Self {
        let last_tick = clock.now();
        Self {
            clock,
            interval,
            last_tick,
        }
    }

    #[inline]
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// ### English
    /// Sleeps for whatever is left of the interval, then reports the elapsed time.
    ///
    /// An iteration that already overran the interval is not shortened to catch up.
    ///
    /// ### 中文
    /// 睡眠到本次间隔剩余的时间，然后报告经过的时间。
    ///
    /// 已经超出间隔的迭代不会为了追赶而缩短。
    pub(crate) fn begin_frame(&mut self) -> FrameTick {
        let mut now = self.clock.now();
        let mut elapsed = now.saturating_duration_since(self.last_tick);

        if let Some(remaining) = self.interval.checked_sub(elapsed).filter(|d| !d.is_zero()) {
            self.clock.sleep(remaining);
            now = self.clock.now();
            elapsed = now.saturating_duration_since(self.last_tick);
        }

        FrameTick { now, elapsed }
    }

    /// ### English
    /// Records `tick.now` as the last-tick time.
    ///
    /// ### 中文
    /// 将 `tick.now` 记录为 last-tick 时间。
    #[inline]
    pub(crate) fn end_frame(&mut self, tick: FrameTick) {
        self.last_tick = tick.now;
    }
}
