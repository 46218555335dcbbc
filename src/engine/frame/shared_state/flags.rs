//! ### English
//! Flag accessors for `SharedPumpState` (draw pass / main loop).
//!
//! Setting the draw pass uses Release so the consumer's Acquire load observes everything the
//! widget renderer wrote for that frame; clearing it uses Release so the pump's next Acquire load
//! observes that submission finished.
//!
//! ### 中文
//! `SharedPumpState` 的标记访问器（draw pass / main loop）。
//!
//! 置位 draw pass 使用 Release，使消费者的 Acquire 读取能看到 widget 渲染器为该帧写入的全部内容；
//! 清除时同样使用 Release，使帧泵下一次 Acquire 读取能看到提交已完成。

use std::sync::atomic::Ordering;
use std::time::Duration;

use super::SharedPumpState;

impl SharedPumpState {
    /// ### English
    /// Returns whether a produced frame is waiting for submission.
    ///
    /// ### 中文
    /// 返回是否有已生产的帧等待提交。
    #[inline]
    pub(crate) fn is_draw_pass_enqueued(&self) -> bool {
        self.draw_pass.enqueued.load(Ordering::Acquire)
    }

    /// ### English
    /// Publishes a produced frame. Producer only; must not be called while already set.
    ///
    /// ### 中文
    /// 发布一帧已生产的画面。仅限生产者调用；已置位时不得再次调用。
    #[inline]
    pub(crate) fn set_draw_pass_enqueued(&self) {
        let was_enqueued = self.draw_pass.enqueued.swap(true, Ordering::AcqRel);
        debug_assert!(!was_enqueued, "draw pass overwritten before submission");
    }

    /// ### English
    /// Marks the frame as submitted and wakes a draining pump.
    ///
    /// ### 中文
    /// 标记该帧已提交，并唤醒处于 drain 阶段的帧泵。
    #[inline]
    pub(crate) fn reset_draw_pass_enqueued(&self) {
        self.draw_pass.enqueued.store(false, Ordering::Release);
        /*
        ### English
        Full means a wake is already pending; one token is enough.

        ### 中文
        通道已满说明已有待处理的唤醒；一个令牌就够了。
        */
        let _ = self.consumed_tx.try_send(());
    }

    /// ### English
    /// Blocks up to `timeout` for the render thread to clear the draw pass.
    ///
    /// Returns `true` once the flag is clear. A stale token from an earlier clear may end the wait
    /// early; callers loop on the result.
    ///
    /// #### Parameters
    /// - `timeout`: Upper bound on this wait (the pump passes its frame interval).
    ///
    /// ### 中文
    /// 最多阻塞 `timeout` 等待渲染线程清除 draw pass。
    ///
    /// 标记被清除后返回 `true`。之前清除留下的旧令牌可能让等待提前结束；调用方需循环检查结果。
    ///
    /// #### 参数
    /// - `timeout`：本次等待的上限（帧泵传入自身的帧间隔）。
    pub(crate) fn wait_draw_pass_consumed(&self, timeout: Duration) -> bool {
        if !self.is_draw_pass_enqueued() {
            return true;
        }
        /*
        ### English
        The sender lives in `self`, so the only errors are timeouts.

        ### 中文
        发送端就在 `self` 中，因此唯一可能的错误是超时。
        */
        let _ = self.consumed_rx.recv_timeout(timeout);
        !self.is_draw_pass_enqueued()
    }

    /// ### English
    /// Drops wake tokens left over from a previous run.
    ///
    /// ### 中文
    /// 丢弃上一次运行遗留的唤醒令牌。
    pub(crate) fn discard_stale_wakes(&self) {
        while self.consumed_rx.try_recv().is_ok() {}
    }

    /// ### English
    /// Best-effort stop: clears both flags so the loop exits on its next check and the drain has
    /// nothing to wait for.
    ///
    /// ### 中文
    /// 尽力停止：清除两个标记，使循环在下一次检查时退出，drain 也无需等待。
    pub(crate) fn request_stop(&self) {
        self.draw_pass.abandoned.store(true, Ordering::Release);
        self.set_main_loop_running(false);
        self.reset_draw_pass_enqueued();
    }

    /// ### English
    /// Returns whether `request_stop` was called since the last `clear_stop_request`.
    ///
    /// ### 中文
    /// 返回自上次 `clear_stop_request` 以来是否调用过 `request_stop`。
    #[inline]
    pub(crate) fn is_stop_requested(&self) -> bool {
        self.draw_pass.abandoned.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn clear_stop_request(&self) {
        self.draw_pass.abandoned.store(false, Ordering::Release);
    }

    /// ### English
    /// Returns the pump's loop condition.
    ///
    /// ### 中文
    /// 返回帧泵的循环条件。
    #[inline]
    pub(crate) fn is_main_loop_running(&self) -> bool {
        self.main_loop.running.load(Ordering::Acquire)
    }

    /// ### English
    /// Sets or clears `MainLoopRunning`.
    ///
    /// ### 中文
    /// 置位或清除 `MainLoopRunning`。
    #[inline]
    pub(crate) fn set_main_loop_running(&self, running: bool) {
        self.main_loop.running.store(running, Ordering::Release);
    }

    /// ### English
    /// Returns whether the pump has not yet confirmed loop exit.
    ///
    /// ### 中文
    /// 返回帧泵是否尚未确认退出循环。
    #[inline]
    pub(crate) fn is_main_loop_active(&self) -> bool {
        self.main_loop.active.load(Ordering::Acquire)
    }

    /// ### English
    /// Sets or clears `MainLoopActive`.
    ///
    /// ### 中文
    /// 置位或清除 `MainLoopActive`。
    #[inline]
    pub(crate) fn set_main_loop_active(&self, active: bool) {
        self.main_loop.active.store(active, Ordering::Release);
    }
}
