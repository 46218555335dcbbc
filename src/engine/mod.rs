/// ### English
/// Engine internal modules (shared flag state, frame pacing, worker thread and facade).
///
/// ### 中文
/// 引擎内部模块（共享标记状态、帧节奏控制、工作线程与外观对象）。
pub(crate) mod cache;
pub mod config;
pub mod error;
pub mod flags;
pub mod frame;
pub mod refresh;
pub mod rendering;
pub mod runtime;

pub use config::PumpConfig;
pub use error::{PumpError, Result};
pub use frame::PumpStats;
pub use refresh::{Clock, SystemClock};
pub use rendering::{MovieStreamer, WidgetRenderer};
pub use runtime::{
    InstanceCounter, PumpThreadMarker, RenderThreadHandle, SynchronizationMechanism,
};
