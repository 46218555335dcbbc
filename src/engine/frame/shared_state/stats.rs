//! ### English
//! Frame counters kept alongside the flag pair.
//!
//! ### 中文
//! 与标记对一起维护的帧计数器。

use std::sync::atomic::Ordering;

use super::SharedPumpState;

/// ### English
/// Snapshot of the pump's production counters since the last `initialize()`.
///
/// ### 中文
/// 自上一次 `initialize()` 以来帧泵生产计数的快照。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// ### English
    /// Frames rendered and handed to the render thread.
    ///
    /// ### 中文
    /// 已渲染并交给渲染线程的帧数。
    pub frames_produced: u64,
    /// ### English
    /// Iterations that dropped production because a draw pass was still enqueued (or the renderer
    /// was not ready).
    ///
    /// ### 中文
    /// 因 draw pass 仍在排队（或渲染器未就绪）而放弃生产的迭代次数。
    pub frames_skipped: u64,
}

impl SharedPumpState {
    #[inline]
    pub(crate) fn record_produced(&self) {
        self.counters.produced.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_skipped(&self) {
        self.counters.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn reset_stats(&self) {
        self.counters.produced.store(0, Ordering::Relaxed);
        self.counters.skipped.store(0, Ordering::Relaxed);
    }

    /// ### English
    /// Reads both counters. The two loads are independent, so the pair may straddle one iteration.
    ///
    /// ### 中文
    /// 读取两个计数器。两次读取相互独立，因此结果可能跨越一次迭代。
    pub(crate) fn stats(&self) -> PumpStats {
        PumpStats {
            frames_produced: self.counters.produced.load(Ordering::Relaxed),
            frames_skipped: self.counters.skipped.load(Ordering::Relaxed),
        }
    }
}
