//! ### English
//! Worker-thread host: owns the platform thread that runs the frame pump.
//!
//! ### 中文
//! 工作线程宿主：持有运行帧泵的平台线程。

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel as channel;
use log::{debug, error, warn};

use crate::engine::error::{PumpError, Result};
use crate::engine::frame::SharedPumpState;

use super::frame_pump::FramePump;
use super::marker::PumpThreadMarker;

/// ### English
/// Everything the worker entry point needs besides the pump itself.
///
/// ### 中文
/// 工作线程入口除帧泵本身之外需要的全部内容。
pub(super) struct PumpThreadContext {
    /// ### English
    /// Marker installed for the lifetime of the pump loop.
    ///
    /// ### 中文
    /// 在帧泵循环期间安装的线程标记。
    pub marker: Arc<PumpThreadMarker>,
    /// ### English
    /// Capacity-1 exit notice; sent once the pump has drained and the marker is cleared.
    ///
    /// ### 中文
    /// 容量为 1 的退出通知；帧泵完成 drain 且标记清除后发送。
    pub exit_tx: channel::Sender<()>,
}

impl PumpThreadContext {
    /// ### English
    /// `Init`: announces this thread as the pump thread.
    ///
    /// ### 中文
    /// `Init`：将本线程声明为帧泵线程。
    fn init(&self) -> bool {
        let installed = self.marker.install();
        if !installed {
            warn!(
                "pump thread marker already held by {:?}; running unmarked",
                self.marker.pump_thread()
            );
        }
        installed
    }

    /// ### English
    /// `Run`: drives the pump to completion, then tears the marker down.
    ///
    /// ### 中文
    /// `Run`：运行帧泵直至结束，然后拆除标记。
    fn run(self, pump: FramePump) {
        let installed = self.init();
        debug_assert!(!installed || self.marker.is_pump_thread());

        pump.run();

        if installed {
            self.marker.clear();
        }
        let _ = self.exit_tx.send(());
    }
}

/// ### English
/// Owner of the spawned pump thread.
///
/// ### 中文
/// 已创建帧泵线程的持有者。
pub(super) struct PumpThreadHost {
    /// ### English
    /// Thread name (`LoadingScreenPump<N>`).
    ///
    /// ### 中文
    /// 线程名称（`LoadingScreenPump<N>`）。
    name: String,
    thread: Option<thread::JoinHandle<()>>,
    /// ### English
    /// Flags cleared by `stop()`.
    ///
    /// ### 中文
    /// `stop()` 会清除的标记。
    state: Arc<SharedPumpState>,
    exit_rx: channel::Receiver<()>,
}

impl PumpThreadHost {
    /// ### English
    /// Spawns the named worker thread running `pump`.
    ///
    /// ### 中文
    /// 创建运行 `pump` 的具名工作线程。
    pub(super) fn spawn(
        name: String,
        state: Arc<SharedPumpState>,
        marker: Arc<PumpThreadMarker>,
        pump: FramePump,
    ) -> Result<Self> {
        let (exit_tx, exit_rx) = channel::bounded(1);
        let context = PumpThreadContext { marker, exit_tx };

        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || context.run(pump))
            .map_err(PumpError::Spawn)?;

        debug!("spawned pump thread {name}");
        Ok(Self {
            name,
            thread: Some(thread),
            state,
            exit_rx,
        })
    }

    #[inline]
    pub(super) fn name(&self) -> &str {
        &self.name
    }

    /// ### English
    /// `Stop`: best-effort unblock from any thread. Clears both flags; the loop exits on its next
    /// check, the drain finds nothing to wait for. No guarantee of immediate exit.
    ///
    /// ### 中文
    /// `Stop`：可从任意线程调用的尽力解除阻塞。清除两个标记；循环在下一次检查时退出，
    /// drain 也不会再等待。不保证立即退出。
    pub(super) fn stop(&self) {
        debug!("stop requested for pump thread {}", self.name);
        self.state.request_stop();
    }

    /// ### English
    /// Blocks until the pump confirmed loop exit (`MainLoopActive == false`).
    ///
    /// `on_idle` runs after every `poll` without news, so the caller can pump its platform event
    /// queue while it waits.
    ///
    /// ### 中文
    /// 阻塞直到帧泵确认退出循环（`MainLoopActive == false`）。
    ///
    /// 每经过一个无消息的 `poll` 周期都会调用 `on_idle`，调用方可借此在等待期间处理平台事件队列。
    pub(super) fn wait_for_exit(&self, poll: Duration, mut on_idle: impl FnMut()) {
        while self.state.is_main_loop_active() {
            match self.exit_rx.recv_timeout(poll) {
                Ok(()) => break,
                Err(channel::RecvTimeoutError::Timeout) => on_idle(),
                Err(channel::RecvTimeoutError::Disconnected) => {
                    /*
                    ### English
                    The worker died without reporting (a collaborator panicked).

                    ### 中文
                    工作线程未报告就退出了（某个协作者 panic）。
                    */
                    error!("pump thread {} exited without draining", self.name);
                    self.state.set_main_loop_active(false);
                    break;
                }
            }
        }
    }

    /// ### English
    /// Joins the worker. Only called after `wait_for_exit`.
    ///
    /// ### 中文
    /// join 工作线程。仅在 `wait_for_exit` 之后调用。
    pub(super) fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("pump thread {} panicked", self.name);
            }
        }
        debug!("joined pump thread {}", self.name);
    }
}
