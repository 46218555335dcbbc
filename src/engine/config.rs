//! ### English
//! Frame-timing configuration, supplied once when the mechanism is built.
//!
//! ### 中文
//! 帧时序配置，在构建同步机制时一次性提供。

use std::time::Duration;

use crate::engine::error::{PumpError, Result};
use crate::engine::flags;

/// ### English
/// Upper bound for `target_fps`; anything above it would make the interval shorter than the
/// scheduler's sleep granularity on common platforms.
///
/// ### 中文
/// `target_fps` 的上限；超过后帧间隔会小于常见平台的睡眠粒度。
pub const MAX_TARGET_FPS: u32 = 1000;

/// ### English
/// Default production cap (frames per second).
///
/// ### 中文
/// 默认的生产帧率上限（帧/秒）。
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// ### English
/// Immutable pump configuration.
///
/// ### 中文
/// 不可变的帧泵配置。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PumpConfig {
    /// ### English
    /// Maximum frames produced per second.
    ///
    /// ### 中文
    /// 每秒最多生产的帧数。
    pub target_fps: u32,
    /// ### English
    /// When false, `initialize()` is a no-op and no worker thread exists.
    ///
    /// ### 中文
    /// 为 false 时 `initialize()` 不做任何事，也不存在工作线程。
    pub enabled: bool,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            enabled: true,
        }
    }
}

impl PumpConfig {
    /// ### English
    /// Enabled config with the given frame cap.
    ///
    /// ### 中文
    /// 指定帧率上限的启用配置。
    pub fn with_target_fps(target_fps: u32) -> Self {
        Self {
            target_fps,
            ..Self::default()
        }
    }

    /// ### English
    /// Builds a config from the C ABI arguments.
    ///
    /// #### Parameters
    /// - `target_fps`: Frame cap (`0` selects `DEFAULT_TARGET_FPS`).
    /// - `create_flags`: `LOADING_SCREEN_PUMP_FLAG_*` bitmask; unknown bits are rejected.
    ///
    /// ### 中文
    /// 由 C ABI 参数构建配置。
    ///
    /// #### 参数
    /// - `target_fps`：帧率上限（`0` 表示使用 `DEFAULT_TARGET_FPS`）。
    /// - `create_flags`：`LOADING_SCREEN_PUMP_FLAG_*` 位掩码；未知位会被拒绝。
    pub fn from_abi(target_fps: u32, create_flags: u32) -> Result<Self> {
        let unknown = create_flags & !flags::LOADING_SCREEN_PUMP_KNOWN_FLAGS;
        if unknown != 0 {
            return Err(PumpError::InvalidConfig(format!(
                "unknown create flags {unknown:#x}"
            )));
        }

        let config = Self {
            target_fps: if target_fps == 0 {
                DEFAULT_TARGET_FPS
            } else {
                target_fps
            },
            enabled: create_flags & flags::LOADING_SCREEN_PUMP_FLAG_DISABLED == 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// ### English
    /// Rejects frame caps of zero or above `MAX_TARGET_FPS`.
    ///
    /// ### 中文
    /// 拒绝为 0 或超过 `MAX_TARGET_FPS` 的帧率上限。
    pub fn validate(&self) -> Result<()> {
        if self.target_fps == 0 {
            return Err(PumpError::InvalidConfig(
                "target_fps must be non-zero".to_string(),
            ));
        }
        if self.target_fps > MAX_TARGET_FPS {
            return Err(PumpError::InvalidConfig(format!(
                "target_fps {} exceeds {MAX_TARGET_FPS}",
                self.target_fps
            )));
        }
        Ok(())
    }

    /// ### English
    /// Target interval between two produced frames.
    ///
    /// ### 中文
    /// 两次帧生产之间的目标间隔。
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.target_fps.max(1)))
    }
}
