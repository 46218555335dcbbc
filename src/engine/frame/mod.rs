/// ### English
/// Lock-free state shared between the pump thread (producer), the render thread (consumer) and the
/// orchestrating thread. Only atomics are touched on the hot path.
///
/// ### 中文
/// 帧泵线程（生产者）、渲染线程（消费者）与编排线程之间共享的无锁状态。
/// 热路径上只访问原子变量。
mod shared_state;

pub(crate) use shared_state::SharedPumpState;
pub use shared_state::PumpStats;
