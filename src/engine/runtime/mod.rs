//! ### English
//! Pump thread orchestration (public API).
//!
//! ### 中文
//! 帧泵线程编排（对外公开 API）。

mod frame_pump;
mod instance;
mod marker;
mod thread_host;

mod mechanism;
mod render_handle;

pub use instance::{InstanceCounter, PUMP_THREAD_NAME_PREFIX};
pub use marker::PumpThreadMarker;
pub use mechanism::SynchronizationMechanism;
pub use render_handle::RenderThreadHandle;
