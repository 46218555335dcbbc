//! ### English
//! Collaborators ticked by the pump thread.
//!
//! Both are engine-owned and shared with the pump through `Arc`; the pump only holds its clones
//! while the worker thread is alive.
//!
//! ### 中文
//! 由帧泵线程驱动的协作者。
//!
//! 两者都由引擎持有，并通过 `Arc` 与帧泵共享；帧泵只在工作线程存活期间持有其克隆。

use std::time::Duration;

/// ### English
/// Draws the loading-screen widget tree into the renderer's own (double-buffered) targets.
///
/// `draw_window` runs on the pump thread and must not submit graphics commands; submission happens
/// later on the render thread once it observes the draw pass.
///
/// ### 中文
/// 将加载界面的 widget 树绘制到渲染器自有的（双缓冲）目标中。
///
/// `draw_window` 在帧泵线程执行，不得提交图形命令；提交在渲染线程观察到 draw pass 之后进行。
pub trait WidgetRenderer: Send + Sync {
    /// ### English
    /// Renders one frame.
    ///
    /// #### Parameters
    /// - `delta`: Time since the previous pump iteration.
    ///
    /// ### 中文
    /// 渲染一帧。
    ///
    /// #### 参数
    /// - `delta`：距上一次帧泵迭代的时间。
    fn draw_window(&self, delta: Duration);

    /// ### English
    /// Whether the UI backend is initialized; production is skipped while this returns false.
    ///
    /// ### 中文
    /// UI 后端是否已初始化；返回 false 时跳过生产。
    fn is_ready(&self) -> bool {
        true
    }
}

/// ### English
/// Movie playback hooks. Optional: without a streamer the pump renders widgets only.
///
/// Order within one produced frame: `tick_pre_engine`, `tick_post_engine`, `draw_window`,
/// draw pass set, `tick_post_render`.
///
/// ### 中文
/// 影片播放钩子。可选：没有 streamer 时帧泵只渲染 widget。
///
/// 单帧内的调用顺序：`tick_pre_engine`、`tick_post_engine`、`draw_window`、
/// 置位 draw pass、`tick_post_render`。
pub trait MovieStreamer: Send + Sync {
    /// ### English
    /// Advances playback before the frame is drawn.
    ///
    /// ### 中文
    /// 在绘制本帧之前推进播放。
    fn tick_pre_engine(&self);

    /// ### English
    /// Runs after `tick_pre_engine`, still before the draw. Optional.
    ///
    /// ### 中文
    /// 在 `tick_pre_engine` 之后、绘制之前执行。可选。
    fn tick_post_engine(&self) {}

    /// ### English
    /// Runs once the draw pass is set for the produced frame.
    ///
    /// ### 中文
    /// 在本帧的 draw pass 置位后执行。
    fn tick_post_render(&self);
}
