mod flags;
mod state;
mod stats;

pub(crate) use state::SharedPumpState;
pub use stats::PumpStats;
