//! ### English
//! Bitflags passed to `loading_screen_pump_create` as a `u32` bitmask.
//!
//! ### 中文
//! 以 `u32` 位掩码形式传给 `loading_screen_pump_create` 的位标志。

/// ### English
/// Disables the pump: `initialize()` succeeds without spawning a worker thread, and the render
/// thread never sees a draw pass.
///
/// ### 中文
/// 禁用帧泵：`initialize()` 直接成功但不创建工作线程，渲染线程也永远不会看到 draw pass。
pub const LOADING_SCREEN_PUMP_FLAG_DISABLED: u32 = 1 << 0;

/// ### English
/// All bits understood by this version of the ABI.
///
/// ### 中文
/// 当前 ABI 版本能识别的全部位。
pub const LOADING_SCREEN_PUMP_KNOWN_FLAGS: u32 = LOADING_SCREEN_PUMP_FLAG_DISABLED;
