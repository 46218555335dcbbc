use std::thread;
use std::time::{Duration, Instant};

/// ### English
/// Time source used by the frame limiter.
///
/// ### 中文
/// 帧限速器使用的时间源。
pub trait Clock {
    /// ### English
    /// Current monotonic timestamp.
    ///
    /// ### 中文
    /// 当前的单调时间戳。
    fn now(&self) -> Instant;

    /// ### English
    /// Blocks the calling thread for `duration`.
    ///
    /// ### 中文
    /// 阻塞调用线程 `duration` 时长。
    fn sleep(&self, duration: Duration);
}

/// ### English
/// Wall clock backed by `Instant::now()` and `thread::sleep`.
///
/// ### 中文
/// 基于 `Instant::now()` 与 `thread::sleep` 的真实时钟。
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// ### English
/// Simulated clock: `sleep` advances time instantly.
///
/// ### 中文
/// 模拟时钟：`sleep` 会立即推进时间。
#[cfg(test)]
pub(crate) struct ManualClock {
    now: std::cell::Cell<Instant>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now: std::cell::Cell::new(Instant::now()),
        }
    }

    pub(crate) fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
impl Clock for std::rc::Rc<ManualClock> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}
