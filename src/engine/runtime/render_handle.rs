use std::sync::Arc;

use crate::engine::frame::{PumpStats, SharedPumpState};

/// ### English
/// Handle given to the render-thread collaborator (thread-safe, cheap to clone).
///
/// Per engine frame the collaborator checks `is_draw_pass_enqueued()`, submits the UI frame if it
/// is set, then calls `reset_draw_pass_enqueued()`. `render_tick` bundles the three steps.
///
/// ### 中文
/// 交给渲染线程协作者的句柄（线程安全，克隆开销低）。
///
/// 协作者在每个引擎帧检查 `is_draw_pass_enqueued()`，若已置位则提交 UI 帧，然后调用
/// `reset_draw_pass_enqueued()`。`render_tick` 将这三步打包在一起。
#[derive(Clone)]
pub struct RenderThreadHandle {
    state: Arc<SharedPumpState>,
}

impl RenderThreadHandle {
    pub(super) fn new(state: Arc<SharedPumpState>) -> Self {
        Self { state }
    }

    /// ### English
    /// Returns whether a produced frame awaits submission.
    ///
    /// ### 中文
    /// 返回是否有已生产的帧等待提交。
    #[inline]
    pub fn is_draw_pass_enqueued(&self) -> bool {
        self.state.is_draw_pass_enqueued()
    }

    /// ### English
    /// Hands the frame back to the pump. Call only after submitting it.
    ///
    /// ### 中文
    /// 将帧交还给帧泵。仅在提交之后调用。
    #[inline]
    pub fn reset_draw_pass_enqueued(&self) {
        self.state.reset_draw_pass_enqueued();
    }

    #[inline]
    pub fn is_main_loop_running(&self) -> bool {
        self.state.is_main_loop_running()
    }

    /// ### English
    /// Submits the pending frame through `submit` if there is one, then clears the draw pass.
    ///
    /// Returns whether `submit` ran. Never runs it when no frame is enqueued.
    ///
    /// #### Parameters
    /// - `submit`: Issues the graphics commands for the produced frame.
    ///
    /// ### 中文
    /// 若有待提交帧，则通过 `submit` 提交，然后清除 draw pass。
    ///
    /// 返回 `submit` 是否被执行。没有排队帧时绝不执行。
    ///
    /// #### 参数
    /// - `submit`：为已生产的帧发出图形命令。
    pub fn render_tick(&self, submit: impl FnOnce()) -> bool {
        if !self.state.is_draw_pass_enqueued() {
            return false;
        }
        submit();
        self.state.reset_draw_pass_enqueued();
        true
    }

    /// ### English
    /// Best-effort stop of the pump loop from the render thread (e.g. on device loss). Clears
    /// both flags; the orchestrating thread must still call `shutdown()`.
    ///
    /// ### 中文
    /// 从渲染线程尽力停止帧泵循环（例如设备丢失时）。清除两个标记；编排线程仍需调用 `shutdown()`。
    pub fn request_stop(&self) {
        self.state.request_stop();
    }

    pub fn stats(&self) -> PumpStats {
        self.state.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_tick_only_submits_enqueued_frames() {
        let state = Arc::new(SharedPumpState::new());
        let handle = RenderThreadHandle::new(state.clone());

        let mut submitted = 0;
        assert!(!handle.render_tick(|| submitted += 1));
        assert_eq!(submitted, 0);

        state.set_draw_pass_enqueued();
        assert!(handle.render_tick(|| submitted += 1));
        assert_eq!(submitted, 1);
        assert!(!handle.is_draw_pass_enqueued());

        assert!(!handle.render_tick(|| submitted += 1));
        assert_eq!(submitted, 1);
    }
}
