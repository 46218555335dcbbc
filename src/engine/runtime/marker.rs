//! ### English
//! Identity marker for "the loading-screen pump thread".
//!
//! ### 中文
//! “加载界面帧泵线程”的身份标记。

use std::thread::{self, ThreadId};

use parking_lot::Mutex;

/// ### English
/// Records which thread is currently the pump thread, so other code can assert it runs there.
///
/// Passed explicitly into the worker entry point. Hosts that run several mechanisms and want a
/// single marker share one `Arc<PumpThreadMarker>` between them; only one pump at a time can hold it.
///
/// ### 中文
/// 记录当前哪个线程是帧泵线程，供其它代码断言自身在该线程执行。
///
/// 显式传入工作线程入口。运行多个同步机制且希望共用一个标记的宿主，可共享同一个
/// `Arc<PumpThreadMarker>`；同一时刻只有一个帧泵能持有它。
#[derive(Debug, Default)]
pub struct PumpThreadMarker {
    current: Mutex<Option<ThreadId>>,
}

impl PumpThreadMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// ### English
    /// Announces the calling thread as the pump thread.
    ///
    /// Returns `false` (and leaves the marker untouched) if another thread already holds it.
    ///
    /// ### 中文
    /// 将调用线程声明为帧泵线程。
    ///
    /// 若已有其它线程持有标记，则返回 `false`（且不修改标记）。
    pub(crate) fn install(&self) -> bool {
        let me = thread::current().id();
        let mut current = self.current.lock();
        match *current {
            Some(owner) if owner != me => false,
            _ => {
                *current = Some(me);
                true
            }
        }
    }

    /// ### English
    /// Clears the marker if the calling thread holds it.
    ///
    /// ### 中文
    /// 若调用线程持有标记，则清除它。
    pub(crate) fn clear(&self) {
        let me = thread::current().id();
        let mut current = self.current.lock();
        if *current == Some(me) {
            *current = None;
        }
    }

    /// ### English
    /// Returns whether the calling thread is the pump thread.
    ///
    /// ### 中文
    /// 返回调用线程是否为帧泵线程。
    pub fn is_pump_thread(&self) -> bool {
        *self.current.lock() == Some(thread::current().id())
    }

    /// ### English
    /// Returns the pump thread's id, if one is running.
    ///
    /// ### 中文
    /// 返回正在运行的帧泵线程 id（如有）。
    pub fn pump_thread(&self) -> Option<ThreadId> {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn install_and_clear_on_same_thread() {
        let marker = PumpThreadMarker::new();
        assert!(!marker.is_pump_thread());
        assert!(marker.install());
        assert!(marker.is_pump_thread());
        assert_eq!(marker.pump_thread(), Some(thread::current().id()));
        marker.clear();
        assert_eq!(marker.pump_thread(), None);
    }

    #[test]
    fn second_thread_cannot_take_the_marker() {
        let marker = Arc::new(PumpThreadMarker::new());
        assert!(marker.install());

        let other = marker.clone();
        let installed = thread::spawn(move || {
            let installed = other.install();
            other.clear();
            (installed, other.is_pump_thread())
        })
        .join()
        .unwrap();

        assert_eq!(installed, (false, false));
        assert!(marker.is_pump_thread());
    }
}
