//! ### English
//! Worker-thread name generator.
//!
//! ### 中文
//! 工作线程名称生成器。

use std::sync::atomic::{AtomicU32, Ordering};

/// ### English
/// Prefix of every pump thread name.
///
/// ### 中文
/// 所有帧泵线程名称的前缀。
pub const PUMP_THREAD_NAME_PREFIX: &str = "LoadingScreenPump";

/// ### English
/// Monotonic counter producing unique, human-readable pump thread names.
///
/// Share one counter (`Arc`) between mechanisms when names must be unique process-wide. Names are
/// cosmetic; nothing relies on them for correctness.
///
/// ### 中文
/// 单调递增计数器，用于生成唯一且易读的帧泵线程名称。
///
/// 需要全进程唯一时，在多个同步机制之间共享同一个计数器（`Arc`）。名称仅用于展示，
/// 正确性不依赖它。
#[derive(Debug, Default)]
pub struct InstanceCounter {
    last: AtomicU32,
}

impl InstanceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// ### English
    /// Increments the counter and returns the name for the new instance (first name ends in `1`).
    ///
    /// ### 中文
    /// 递增计数器并返回新实例的名称（第一个名称以 `1` 结尾）。
    pub fn next_thread_name(&self) -> String {
        let id = self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        format!("{PUMP_THREAD_NAME_PREFIX}{id}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn names_count_up_from_one() {
        let counter = InstanceCounter::new();
        assert_eq!(counter.next_thread_name(), "LoadingScreenPump1");
        assert_eq!(counter.next_thread_name(), "LoadingScreenPump2");
    }

    #[test]
    fn shared_counter_never_repeats() {
        let counter = Arc::new(InstanceCounter::new());
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let counter = counter.clone();
                thread::spawn(move || {
                    (0..100)
                        .map(|_| counter.next_thread_name())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for worker in workers {
            for name in worker.join().unwrap() {
                assert!(seen.insert(name));
            }
        }
        assert_eq!(seen.len(), 400);
    }
}
