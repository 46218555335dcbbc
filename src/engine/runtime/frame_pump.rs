//! ### English
//! Pump loop: runs on the worker thread, produces at most one outstanding frame at a capped rate.
//!
//! ### 中文
//! 帧泵循环：在工作线程运行，以受限速率生产，且最多只有一帧未被提交。

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::engine::frame::SharedPumpState;
use crate::engine::refresh::{Clock, FrameLimiter, SystemClock};
use crate::engine::rendering::{MovieStreamer, WidgetRenderer};

/// ### English
/// Result of one pump iteration.
///
/// ### 中文
/// 单次帧泵迭代的结果。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameOutcome {
    /// ### English
    /// A frame was rendered and the draw pass enqueued.
    ///
    /// ### 中文
    /// 渲染了一帧并已将 draw pass 入队。
    Produced,
    /// ### English
    /// The previous frame was still unsubmitted (or the renderer not ready); nothing was drawn.
    ///
    /// ### 中文
    /// 上一帧尚未提交（或渲染器未就绪）；本次未绘制。
    Skipped,
}

/// ### English
/// Worker-side state: collaborators, limiter and the shared flags.
///
/// ### 中文
/// 工作线程侧状态：协作者、限速器与共享标记。
pub(crate) struct FramePump<C: Clock = SystemClock> {
    /// ### English
    /// Flag pair shared with the render thread and the orchestrating thread.
    ///
    /// ### 中文
    /// 与渲染线程、编排线程共享的标记对。
    state: Arc<SharedPumpState>,
    widget_renderer: Arc<dyn WidgetRenderer>,
    movie_streamer: Option<Arc<dyn MovieStreamer>>,
    /// ### English
    /// Owns the last-tick timestamp; never touched outside this thread.
    ///
    /// ### 中文
    /// 持有 last-tick 时间戳；不会在本线程之外被访问。
    limiter: FrameLimiter<C>,
}

impl<C: Clock> FramePump<C> {
    pub(crate) fn new(
        state: Arc<SharedPumpState>,
        widget_renderer: Arc<dyn WidgetRenderer>,
        movie_streamer: Option<Arc<dyn MovieStreamer>>,
        limiter: FrameLimiter<C>,
    ) -> Self {
        Self {
            state,
            widget_renderer,
            movie_streamer,
            limiter,
        }
    }

    /// ### English
    /// Runs until `MainLoopRunning` is cleared, drains the last frame, then clears `MainLoopActive`.
    ///
    /// ### 中文
    /// 持续运行直到 `MainLoopRunning` 被清除，drain 最后一帧，然后清除 `MainLoopActive`。
    pub(crate) fn run(mut self) {
        while self.state.is_main_loop_running() {
            self.iterate();
        }

        self.drain();
        self.state.set_main_loop_active(false);
    }

    /// ### English
    /// One iteration: pace, then produce unless a draw pass is still enqueued.
    ///
    /// ### 中文
    /// 单次迭代：先控制节奏，然后在没有排队的 draw pass 时生产一帧。
    pub(crate) fn iterate(&mut self) -> FrameOutcome {
        let tick = self.limiter.begin_frame();

        let outcome = if !self.state.is_draw_pass_enqueued() && self.widget_renderer.is_ready() {
            if let Some(streamer) = &self.movie_streamer {
                streamer.tick_pre_engine();
                streamer.tick_post_engine();
            }

            self.widget_renderer.draw_window(tick.elapsed);
            self.state.set_draw_pass_enqueued();

            if let Some(streamer) = &self.movie_streamer {
                streamer.tick_post_render();
            }

            self.state.record_produced();
            trace!("frame produced after {:?}", tick.elapsed);
            FrameOutcome::Produced
        } else {
            self.state.record_skipped();
            trace!("frame skipped, draw pass still enqueued");
            FrameOutcome::Skipped
        };

        self.limiter.end_frame(tick);
        outcome
    }

    /// ### English
    /// Gives the render thread the chance to submit the final frame before the collaborators'
    /// inputs are torn down. Blocks indefinitely if the render thread stopped ticking, unless a
    /// stop was requested.
    ///
    /// ### 中文
    /// 在协作者的输入被销毁之前，给渲染线程提交最后一帧的机会。
    /// 若渲染线程已停止 tick，则会无限期阻塞，除非已请求停止。
    fn drain(&self) {
        if !self.state.is_draw_pass_enqueued() {
            return;
        }

        debug!("draining last enqueued frame");
        let interval = self.limiter.interval();
        while !self.state.wait_draw_pass_consumed(interval) {
            if self.state.is_stop_requested() {
                warn!("stop requested; abandoning unsubmitted frame");
                return;
            }
        }
    }
}
