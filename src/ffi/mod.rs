//! ### English
//! C ABI surface for `loading_screen_pump`.
//!
//! All exported symbols are `extern "C"` functions; structs are `#[repr(C)]`. The host supplies
//! its widget renderer and optional movie streamer as a table of C callbacks; those callbacks are
//! invoked on the pump thread, so they must be safe to call from a thread other than the one that
//! created the pump.
//!
//! ### 中文
//! `loading_screen_pump` 的 C ABI 接口层。
//!
//! 所有导出符号均为 `extern "C"` 函数；结构体使用 `#[repr(C)]`。宿主以 C 回调表的形式提供
//! widget 渲染器与可选的影片 streamer；这些回调会在帧泵线程上执行，因此必须能在创建帧泵的线程
//! 之外被安全调用。
mod abi;
mod engine;
mod frame;

use std::ffi::c_void;
use std::time::Duration;

use crate::engine::{MovieStreamer, RenderThreadHandle, SynchronizationMechanism, WidgetRenderer};

#[repr(C)]
/// ### English
/// Opaque pump handle owning the synchronization mechanism (and through it the worker thread).
///
/// ### 中文
/// 不透明帧泵句柄，持有同步机制（并经由它持有工作线程）。
pub struct LoadingScreenPump {
    /// ### English
    /// The mechanism driven by the exported functions.
    ///
    /// ### 中文
    /// 由导出函数驱动的同步机制。
    mechanism: SynchronizationMechanism,
    /// ### English
    /// Render-thread view of the same flags. Render-thread entry points only borrow this field, so
    /// they never alias the orchestrating thread's `&mut` to `mechanism`.
    ///
    /// ### 中文
    /// 同一组标记的渲染线程视图。渲染线程入口只借用该字段，因此不会与编排线程对 `mechanism`
    /// 的 `&mut` 产生别名。
    render: RenderThreadHandle,
}

#[repr(C)]
#[derive(Clone, Copy)]
/// ### English
/// Callback table supplied to `loading_screen_pump_create`.
///
/// `draw_window` is required. The movie streamer exists iff at least one `movie_*` hook is set;
/// missing hooks of a present streamer are skipped.
///
/// ### 中文
/// 传给 `loading_screen_pump_create` 的回调表。
///
/// `draw_window` 为必需项。只要任一 `movie_*` 钩子非空，就视为存在影片 streamer；
/// 已存在 streamer 中缺失的钩子会被跳过。
pub struct LoadingScreenPumpCallbacks {
    /// ### English
    /// Opaque pointer passed back as the first argument of every callback.
    ///
    /// ### 中文
    /// 不透明指针，作为每个回调的第一个参数回传。
    pub user_data: *mut c_void,
    /// ### English
    /// Renders one UI frame; the second argument is the elapsed time in seconds.
    ///
    /// ### 中文
    /// 渲染一帧 UI；第二个参数为经过的时间（秒）。
    pub draw_window: Option<unsafe extern "C" fn(*mut c_void, f64)>,
    /// ### English
    /// Optional readiness probe; production is skipped while it returns false.
    ///
    /// ### 中文
    /// 可选的就绪探测；返回 false 时跳过生产。
    pub is_ready: Option<unsafe extern "C" fn(*mut c_void) -> bool>,
    pub movie_tick_pre_engine: Option<unsafe extern "C" fn(*mut c_void)>,
    pub movie_tick_post_engine: Option<unsafe extern "C" fn(*mut c_void)>,
    pub movie_tick_post_render: Option<unsafe extern "C" fn(*mut c_void)>,
}

/// ### English
/// C ABI version for `loading_screen_pump`.
///
/// ### 中文
/// `loading_screen_pump` 的 C ABI 版本号。
const LOADING_SCREEN_PUMP_ABI_VERSION: u32 = 1;

/// ### English
/// Widget renderer backed by the host's callbacks. `user_data` is carried as `usize` so the adapter
/// is `Send + Sync`; the host guarantees the pointee may be used from the pump thread.
///
/// ### 中文
/// 由宿主回调实现的 widget 渲染器。`user_data` 以 `usize` 形式携带，使适配器满足 `Send + Sync`；
/// 宿主保证其指向的对象可在帧泵线程上使用。
struct CallbackWidgetRenderer {
    user_data: usize,
    draw_window: unsafe extern "C" fn(*mut c_void, f64),
    is_ready: Option<unsafe extern "C" fn(*mut c_void) -> bool>,
}

impl WidgetRenderer for CallbackWidgetRenderer {
    fn draw_window(&self, delta: Duration) {
        unsafe { (self.draw_window)(self.user_data as *mut c_void, delta.as_secs_f64()) };
    }

    fn is_ready(&self) -> bool {
        match self.is_ready {
            Some(is_ready) => unsafe { is_ready(self.user_data as *mut c_void) },
            None => true,
        }
    }
}

/// ### English
/// Movie streamer backed by the host's callbacks.
///
/// ### 中文
/// 由宿主回调实现的影片 streamer。
struct CallbackMovieStreamer {
    user_data: usize,
    tick_pre_engine: Option<unsafe extern "C" fn(*mut c_void)>,
    tick_post_engine: Option<unsafe extern "C" fn(*mut c_void)>,
    tick_post_render: Option<unsafe extern "C" fn(*mut c_void)>,
}

impl CallbackMovieStreamer {
    #[inline]
    fn call(&self, hook: Option<unsafe extern "C" fn(*mut c_void)>) {
        if let Some(hook) = hook {
            unsafe { hook(self.user_data as *mut c_void) };
        }
    }
}

impl MovieStreamer for CallbackMovieStreamer {
    fn tick_pre_engine(&self) {
        self.call(self.tick_pre_engine);
    }

    fn tick_post_engine(&self) {
        self.call(self.tick_post_engine);
    }

    fn tick_post_render(&self) {
        self.call(self.tick_post_render);
    }
}

impl LoadingScreenPumpCallbacks {
    /// ### English
    /// Splits the table into the widget renderer and the optional movie streamer.
    ///
    /// Returns `None` when `draw_window` is missing.
    ///
    /// ### 中文
    /// 将回调表拆分为 widget 渲染器与可选的影片 streamer。
    ///
    /// `draw_window` 缺失时返回 `None`。
    fn into_collaborators(
        self,
    ) -> Option<(CallbackWidgetRenderer, Option<CallbackMovieStreamer>)> {
        let user_data = self.user_data as usize;
        let renderer = CallbackWidgetRenderer {
            user_data,
            draw_window: self.draw_window?,
            is_ready: self.is_ready,
        };

        let has_movie = self.movie_tick_pre_engine.is_some()
            || self.movie_tick_post_engine.is_some()
            || self.movie_tick_post_render.is_some();
        let streamer = has_movie.then_some(CallbackMovieStreamer {
            user_data,
            tick_pre_engine: self.movie_tick_pre_engine,
            tick_post_engine: self.movie_tick_post_engine,
            tick_post_render: self.movie_tick_post_render,
        });

        Some((renderer, streamer))
    }
}
