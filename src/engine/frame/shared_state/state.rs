use std::sync::atomic::{AtomicBool, AtomicU64};

use crossbeam_channel as channel;

use crate::engine::cache::pad_after2;

/// ### English
/// The flag pair plus worker-exit flag and counters for one mechanism instance.
///
/// ### 中文
/// 单个同步机制实例的标记对、工作线程退出标记与计数器。
#[repr(C)]
pub(crate) struct SharedPumpState {
    /// ### English
    /// `DrawPassEnqueued`: set by the pump, cleared by the render thread.
    ///
    /// ### 中文
    /// `DrawPassEnqueued`：由帧泵置位、由渲染线程清除。
    pub(super) draw_pass: DrawPassLine,
    /// ### English
    /// `MainLoopRunning` / `MainLoopActive`.
    ///
    /// ### 中文
    /// `MainLoopRunning` / `MainLoopActive`。
    pub(super) main_loop: MainLoopLine,
    /// ### English
    /// Produced / skipped frame counters (pump writes, anyone reads).
    ///
    /// ### 中文
    /// 已生产 / 已跳过帧计数（帧泵写入，任意线程读取）。
    pub(super) counters: CounterLine,
    /// ### English
    /// Capacity-1 wake signal raised whenever the draw pass is cleared; the pump blocks on it while
    /// draining instead of spinning.
    ///
    /// ### 中文
    /// 容量为 1 的唤醒信号，每次清除 draw pass 时触发；帧泵在 drain 阶段阻塞等待它而不是自旋。
    pub(super) consumed_tx: channel::Sender<()>,
    pub(super) consumed_rx: channel::Receiver<()>,
}

#[repr(C, align(64))]
pub(super) struct DrawPassLine {
    pub(super) enqueued: AtomicBool,
    /// ### English
    /// Set by `request_stop`; the pump abandons its drain instead of waiting for a consumer.
    ///
    /// ### 中文
    /// 由 `request_stop` 置位；帧泵放弃 drain，不再等待消费者。
    pub(super) abandoned: AtomicBool,
    _pad: [u8; pad_after2::<AtomicBool, AtomicBool>()],
}

#[repr(C, align(64))]
pub(super) struct MainLoopLine {
    /// ### English
    /// Loop condition of the pump; cleared to request shutdown.
    ///
    /// ### 中文
    /// 帧泵的循环条件；清除即请求关闭。
    pub(super) running: AtomicBool,
    /// ### English
    /// True from `initialize()` until the pump finished draining.
    ///
    /// ### 中文
    /// 从 `initialize()` 起为 true，直到帧泵完成 drain。
    pub(super) active: AtomicBool,
    _pad: [u8; pad_after2::<AtomicBool, AtomicBool>()],
}

#[repr(C, align(64))]
pub(super) struct CounterLine {
    pub(super) produced: AtomicU64,
    pub(super) skipped: AtomicU64,
    _pad: [u8; pad_after2::<AtomicU64, AtomicU64>()],
}

impl SharedPumpState {
    /// ### English
    /// All flags cleared, counters at zero.
    ///
    /// ### 中文
    /// 所有标记清除，计数器归零。
    pub(crate) fn new() -> Self {
        let (consumed_tx, consumed_rx) = channel::bounded(1);
        Self {
            draw_pass: DrawPassLine {
                enqueued: AtomicBool::new(false),
                abandoned: AtomicBool::new(false),
                _pad: [0; pad_after2::<AtomicBool, AtomicBool>()],
            },
            main_loop: MainLoopLine {
                running: AtomicBool::new(false),
                active: AtomicBool::new(false),
                _pad: [0; pad_after2::<AtomicBool, AtomicBool>()],
            },
            counters: CounterLine {
                produced: AtomicU64::new(0),
                skipped: AtomicU64::new(0),
                _pad: [0; pad_after2::<AtomicU64, AtomicU64>()],
            },
            consumed_tx,
            consumed_rx,
        }
    }
}
