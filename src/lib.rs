/// ### English
/// `loading_screen_pump` crate root.
/// Exposes the C ABI via `ffi`; the cross-thread frame pump lives under `engine`.
///
/// ### 中文
/// `loading_screen_pump` 的 crate 根。
/// 通过 `ffi` 导出 C ABI；跨线程帧泵实现位于 `engine` 模块。
pub mod engine;
mod ffi;

pub use engine::{
    Clock, InstanceCounter, MovieStreamer, PumpConfig, PumpError, PumpStats, PumpThreadMarker,
    RenderThreadHandle, Result, SynchronizationMechanism, SystemClock, WidgetRenderer,
};
