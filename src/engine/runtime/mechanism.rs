//! ### English
//! Synchronization mechanism: the facade the orchestrating thread starts and stops.
//!
//! ### 中文
//! 同步机制：编排线程用来启动与停止的外观对象。

use std::sync::Arc;
use std::thread::{self, ThreadId};

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::engine::config::PumpConfig;
use crate::engine::error::{PumpError, Result};
use crate::engine::frame::{PumpStats, SharedPumpState};
use crate::engine::refresh::{FrameLimiter, SystemClock};
use crate::engine::rendering::{MovieStreamer, WidgetRenderer};

use super::frame_pump::FramePump;
use super::instance::InstanceCounter;
use super::marker::PumpThreadMarker;
use super::render_handle::RenderThreadHandle;
use super::thread_host::PumpThreadHost;

/// ### English
/// Keeps the loading-screen UI drawing on a worker thread while the orchestrating thread is
/// blocked, and defers submission to the render thread through the draw-pass flag.
///
/// Created when playback begins, on the thread that will later call `initialize()` and
/// `shutdown()`. Dropping it shuts the worker down and blocks until it exited.
///
/// ### 中文
/// 在编排线程阻塞时让加载界面 UI 在工作线程上持续绘制，并通过 draw-pass 标记把提交推迟到渲染线程。
///
/// 在播放开始时创建，且必须在之后调用 `initialize()` 与 `shutdown()` 的同一线程上创建。
/// drop 时会关闭工作线程并阻塞直到其退出。
pub struct SynchronizationMechanism {
    /// ### English
    /// Engine-owned widget renderer (required).
    ///
    /// ### 中文
    /// 引擎持有的 widget 渲染器（必需）。
    widget_renderer: Arc<dyn WidgetRenderer>,
    /// ### English
    /// Engine-owned movie streamer (optional).
    ///
    /// ### 中文
    /// 引擎持有的影片 streamer（可选）。
    movie_streamer: Option<Arc<dyn MovieStreamer>>,
    config: PumpConfig,
    /// ### English
    /// Flag pair, `MainLoopActive` and counters shared with the worker and the render thread.
    ///
    /// ### 中文
    /// 与工作线程、渲染线程共享的标记对、`MainLoopActive` 与计数器。
    state: Arc<SharedPumpState>,
    marker: Arc<PumpThreadMarker>,
    instance_counter: Arc<InstanceCounter>,
    /// ### English
    /// The orchestrating thread; `initialize()`/`shutdown()` are rejected elsewhere.
    ///
    /// ### 中文
    /// 编排线程；在其它线程调用 `initialize()`/`shutdown()` 会被拒绝。
    owner: ThreadId,
    /// ### English
    /// Live worker, if any. At most one per instance.
    ///
    /// ### 中文
    /// 当前存活的工作线程（如有）。每个实例最多一个。
    host: Option<PumpThreadHost>,
    /// ### English
    /// Platform event pump run by `shutdown()` while it waits.
    ///
    /// ### 中文
    /// `shutdown()` 等待期间运行的平台事件泵。
    event_pump: Mutex<Option<Box<dyn FnMut() + Send>>>,
}

impl SynchronizationMechanism {
    /// ### English
    /// Creates an idle mechanism owned by the calling thread.
    ///
    /// #### Parameters
    /// - `widget_renderer`: Draws the UI on the pump thread.
    /// - `movie_streamer`: Optional movie hooks; `None` degrades to widget-only rendering.
    /// - `config`: Frame-timing configuration, immutable from here on.
    ///
    /// ### 中文
    /// 创建一个由调用线程持有的空闲同步机制。
    ///
    /// #### 参数
    /// - `widget_renderer`：在帧泵线程绘制 UI。
    /// - `movie_streamer`：可选的影片钩子；`None` 时退化为只渲染 widget。
    /// - `config`：帧时序配置，此后不可变。
    pub fn new(
        widget_renderer: Arc<dyn WidgetRenderer>,
        movie_streamer: Option<Arc<dyn MovieStreamer>>,
        config: PumpConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            widget_renderer,
            movie_streamer,
            config,
            state: Arc::new(SharedPumpState::new()),
            marker: Arc::new(PumpThreadMarker::new()),
            instance_counter: Arc::new(InstanceCounter::new()),
            owner: thread::current().id(),
            host: None,
            event_pump: Mutex::new(None),
        })
    }

    /// ### English
    /// Uses `counter` to name worker threads (share it to keep names unique across mechanisms).
    ///
    /// ### 中文
    /// 使用 `counter` 为工作线程命名（共享它可让多个同步机制间的名称保持唯一）。
    pub fn with_instance_counter(mut self, counter: Arc<InstanceCounter>) -> Self {
        self.instance_counter = counter;
        self
    }

    /// ### English
    /// Uses `marker` as the pump-thread identity marker.
    ///
    /// ### 中文
    /// 使用 `marker` 作为帧泵线程身份标记。
    pub fn with_thread_marker(mut self, marker: Arc<PumpThreadMarker>) -> Self {
        self.marker = marker;
        self
    }

    /// ### English
    /// Installs a callback that `shutdown()` runs once per frame interval while waiting for the
    /// worker, e.g. to pump the platform message queue.
    ///
    /// ### 中文
    /// 安装一个回调：`shutdown()` 等待工作线程期间每个帧间隔调用一次，例如用于处理平台消息队列。
    pub fn with_event_pump(mut self, event_pump: impl FnMut() + Send + 'static) -> Self {
        self.event_pump = Mutex::new(Some(Box::new(event_pump)));
        self
    }

    /// ### English
    /// Starts the pump thread.
    ///
    /// Clears `DrawPassEnqueued`, sets `MainLoopRunning` and `MainLoopActive`, resets the counters
    /// and spawns a worker named from the instance counter. A disabled config returns `Ok` without
    /// spawning anything.
    ///
    /// #### Errors
    /// - `WrongThread`: not called from the thread that created the mechanism.
    /// - `AlreadyRunning`: a worker is still active; no second worker is spawned.
    /// - `Spawn`: the platform refused to create the thread; all flags are cleared again.
    ///
    /// ### 中文
    /// 启动帧泵线程。
    ///
    /// 清除 `DrawPassEnqueued`，置位 `MainLoopRunning` 与 `MainLoopActive`，重置计数器，
    /// 并创建一个以实例计数器命名的工作线程。禁用配置下直接返回 `Ok`，不创建任何线程。
    ///
    /// #### 错误
    /// - `WrongThread`：不是在创建该同步机制的线程上调用。
    /// - `AlreadyRunning`：已有工作线程处于活动状态；不会创建第二个。
    /// - `Spawn`：平台拒绝创建线程；所有标记会被重新清除。
    pub fn initialize(&mut self) -> Result<()> {
        self.check_owner("initialize")?;

        if let Some(host) = &self.host {
            let err = PumpError::AlreadyRunning {
                thread_name: host.name().to_string(),
            };
            error!("{err}");
            return Err(err);
        }

        if !self.config.enabled {
            debug!("loading screen pump disabled; not spawning a worker");
            return Ok(());
        }

        self.state.clear_stop_request();
        self.state.reset_draw_pass_enqueued();
        self.state.discard_stale_wakes();
        self.state.reset_stats();
        self.state.set_main_loop_running(true);
        self.state.set_main_loop_active(true);

        let name = self.instance_counter.next_thread_name();
        let limiter = FrameLimiter::new(SystemClock, self.config.frame_interval());
        let pump = FramePump::new(
            self.state.clone(),
            self.widget_renderer.clone(),
            self.movie_streamer.clone(),
            limiter,
        );

        match PumpThreadHost::spawn(name, self.state.clone(), self.marker.clone(), pump) {
            Ok(host) => {
                info!(
                    "loading screen pump {} started at {} fps",
                    host.name(),
                    self.config.target_fps
                );
                self.host = Some(host);
                Ok(())
            }
            Err(err) => {
                error!("{err}");
                self.state.set_main_loop_running(false);
                self.state.set_main_loop_active(false);
                Err(err)
            }
        }
    }

    /// ### English
    /// Stops the pump thread and waits for it.
    ///
    /// Clears `MainLoopRunning`, then blocks until the pump drained its last frame and reported
    /// `MainLoopActive == false`, then joins the worker. The wait depends on the render thread
    /// still ticking: if it never clears the draw pass, this never returns.
    ///
    /// A call with no active worker does nothing.
    ///
    /// #### Errors
    /// - `WrongThread`: not called from the thread that created the mechanism.
    ///
    /// ### 中文
    /// 停止帧泵线程并等待其结束。
    ///
    /// 清除 `MainLoopRunning`，随后阻塞直到帧泵 drain 完最后一帧并报告 `MainLoopActive == false`，
    /// 再 join 工作线程。等待依赖渲染线程持续 tick：若其永不清除 draw pass，本函数永不返回。
    ///
    /// 没有活动工作线程时调用不做任何事。
    ///
    /// #### 错误
    /// - `WrongThread`：不是在创建该同步机制的线程上调用。
    pub fn shutdown(&mut self) -> Result<()> {
        self.check_owner("shutdown")?;
        self.destroy_pump_thread();
        Ok(())
    }

    /// ### English
    /// `Stop`: best-effort unblock of the worker, callable from any thread. `shutdown()` must
    /// still be called to join it.
    ///
    /// ### 中文
    /// `Stop`：可从任意线程调用的尽力解除阻塞。仍需调用 `shutdown()` 来 join 工作线程。
    pub fn request_stop(&self) {
        if let Some(host) = &self.host {
            host.stop();
        }
    }

    #[inline]
    pub fn is_draw_pass_enqueued(&self) -> bool {
        self.state.is_draw_pass_enqueued()
    }

    /// ### English
    /// Consumer side of the draw pass. Only the pump thread ever sets it.
    ///
    /// ### 中文
    /// draw pass 的消费者侧。只有帧泵线程会置位它。
    #[inline]
    pub fn reset_draw_pass_enqueued(&self) {
        self.state.reset_draw_pass_enqueued();
    }

    #[inline]
    pub fn is_main_loop_running(&self) -> bool {
        self.state.is_main_loop_running()
    }

    /// ### English
    /// True from `initialize()` until the pump confirmed loop exit.
    ///
    /// ### 中文
    /// 从 `initialize()` 起为 true，直到帧泵确认退出循环。
    #[inline]
    pub fn is_main_loop_active(&self) -> bool {
        self.state.is_main_loop_active()
    }

    /// ### English
    /// Name of the live worker thread, if any.
    ///
    /// ### 中文
    /// 当前存活工作线程的名称（如有）。
    pub fn thread_name(&self) -> Option<&str> {
        self.host.as_ref().map(PumpThreadHost::name)
    }

    pub fn thread_marker(&self) -> &Arc<PumpThreadMarker> {
        &self.marker
    }

    pub fn config(&self) -> &PumpConfig {
        &self.config
    }

    pub fn stats(&self) -> PumpStats {
        self.state.stats()
    }

    /// ### English
    /// Creates a handle for the render-thread collaborator.
    ///
    /// ### 中文
    /// 为渲染线程协作者创建句柄。
    pub fn render_handle(&self) -> RenderThreadHandle {
        RenderThreadHandle::new(self.state.clone())
    }

    fn check_owner(&self, operation: &'static str) -> Result<()> {
        if thread::current().id() == self.owner {
            return Ok(());
        }
        let err = PumpError::WrongThread { operation };
        error!("{err}");
        Err(err)
    }

    /// ### English
    /// Shuts the worker down from whichever thread tears the mechanism down. Idempotent; what
    /// `Drop` runs, and what the C ABI runs before freeing the handle.
    ///
    /// ### 中文
    /// 在销毁同步机制的线程上关闭工作线程。可重复调用；`Drop` 执行的就是它，C ABI 在释放句柄前也会调用。
    pub(crate) fn release_worker(&mut self) {
        if self.host.is_some() && thread::current().id() != self.owner {
            warn!("loading screen pump released off the orchestrating thread; shutting down anyway");
        }
        self.destroy_pump_thread();
    }

    fn destroy_pump_thread(&mut self) {
        let Some(host) = self.host.take() else {
            return;
        };

        self.state.set_main_loop_running(false);

        let poll = self.config.frame_interval();
        match self.event_pump.get_mut().as_mut() {
            Some(event_pump) => host.wait_for_exit(poll, event_pump),
            None => host.wait_for_exit(poll, || {}),
        }

        host.join();
        info!("loading screen pump stopped: {:?}", self.state.stats());
    }
}

impl Drop for SynchronizationMechanism {
    /// ### English
    /// Blocks until the worker has fully exited.
    ///
    /// ### 中文
    /// 阻塞直到工作线程完全退出。
    fn drop(&mut self) {
        self.release_worker();
    }
}
