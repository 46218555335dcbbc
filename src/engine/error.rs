//! ### English
//! Error type for the loading-screen frame pump.
//!
//! ### 中文
//! 加载界面帧泵的错误类型。

use thiserror::Error;

/// ### English
/// Errors reported by `SynchronizationMechanism`.
///
/// `AlreadyRunning` and `WrongThread` are caller-contract violations: they signal a host
/// integration bug and nothing is started or stopped when they are returned.
///
/// ### 中文
/// `SynchronizationMechanism` 报告的错误。
///
/// `AlreadyRunning` 与 `WrongThread` 属于调用方契约违规：表示宿主集成存在 bug，
/// 返回这些错误时不会启动或停止任何东西。
#[derive(Error, Debug)]
pub enum PumpError {
    /// ### English
    /// `initialize()` was called while a pump thread is still active.
    ///
    /// ### 中文
    /// 在帧泵线程仍处于活动状态时调用了 `initialize()`。
    #[error("frame pump already running on thread {thread_name}")]
    AlreadyRunning {
        /// Name of the live worker thread.
        thread_name: String,
    },

    /// ### English
    /// `initialize()` / `shutdown()` called from a thread other than the orchestrating one.
    ///
    /// ### 中文
    /// 从非编排线程调用了 `initialize()` / `shutdown()`。
    #[error("{operation} must be called from the orchestrating thread")]
    WrongThread {
        /// The rejected operation.
        operation: &'static str,
    },

    /// ### English
    /// Frame-timing configuration rejected at construction.
    ///
    /// ### 中文
    /// 构造时被拒绝的帧时序配置。
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// ### English
    /// The platform refused to spawn the pump thread.
    ///
    /// ### 中文
    /// 平台无法创建帧泵线程。
    #[error("failed to spawn pump thread")]
    Spawn(#[source] std::io::Error),
}

/// ### English
/// Crate-wide result alias.
///
/// ### 中文
/// crate 通用的 Result 别名。
pub type Result<T> = std::result::Result<T, PumpError>;
