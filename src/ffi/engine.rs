//! ### English
//! C ABI bindings for pump lifecycle (create/destroy/initialize/shutdown). Orchestrating thread only,
//! except `request_stop`.
//!
//! ### 中文
//! 帧泵生命周期相关的 C ABI 绑定（create/destroy/initialize/shutdown）。
//! 除 `request_stop` 外仅限编排线程调用。

use std::sync::Arc;

use log::error;

use super::{LoadingScreenPump, LoadingScreenPumpCallbacks};
use crate::engine::{MovieStreamer, PumpConfig, SynchronizationMechanism};

#[unsafe(no_mangle)]
/// ### English
/// Creates an idle pump owned by the calling (orchestrating) thread.
///
/// `target_fps == 0` selects the default of 60. `flags` is a `LOADING_SCREEN_PUMP_FLAG_*` bitmask.
/// Returns NULL if `callbacks` is NULL, `draw_window` is missing, or the configuration is invalid.
///
/// ### 中文
/// 创建一个由调用线程（编排线程）持有的空闲帧泵。
///
/// `target_fps == 0` 表示使用默认值 60。`flags` 为 `LOADING_SCREEN_PUMP_FLAG_*` 位掩码。
/// 若 `callbacks` 为 NULL、缺少 `draw_window` 或配置无效，则返回 NULL。
pub unsafe extern "C" fn loading_screen_pump_create(
    callbacks: *const LoadingScreenPumpCallbacks,
    target_fps: u32,
    flags: u32,
) -> *mut LoadingScreenPump {
    if callbacks.is_null() {
        return std::ptr::null_mut();
    }

    let Some((renderer, streamer)) = unsafe { *callbacks }.into_collaborators() else {
        error!("loading_screen_pump_create: draw_window callback is required");
        return std::ptr::null_mut();
    };

    let config = match PumpConfig::from_abi(target_fps, flags) {
        Ok(config) => config,
        Err(err) => {
            error!("loading_screen_pump_create: {err}");
            return std::ptr::null_mut();
        }
    };

    let streamer = streamer.map(|s| Arc::new(s) as Arc<dyn MovieStreamer>);
    let Ok(mechanism) = SynchronizationMechanism::new(Arc::new(renderer), streamer, config) else {
        return std::ptr::null_mut();
    };

    let render = mechanism.render_handle();
    Box::into_raw(Box::new(LoadingScreenPump { mechanism, render }))
}

#[unsafe(no_mangle)]
/// ### English
/// Destroys a pump created by `loading_screen_pump_create`.
///
/// Shuts the worker down first and blocks until it drained and exited; the render thread keeps
/// using the handle during that wait. Once this returns the handle is freed and the render thread
/// must not touch it again.
///
/// ### 中文
/// 销毁由 `loading_screen_pump_create` 创建的帧泵。
///
/// 会先关闭工作线程并阻塞直到其 drain 完成并退出；等待期间渲染线程仍会使用该句柄。
/// 返回后句柄已被释放，渲染线程不得再访问。
pub unsafe extern "C" fn loading_screen_pump_destroy(pump: *mut LoadingScreenPump) {
    if pump.is_null() {
        return;
    }
    /*
    ### English
    Drain through the raw pointer so the render thread's `&(*pump).render` never overlaps a `Box`
    that owns the whole handle.

    ### 中文
    通过裸指针完成 drain，使渲染线程的 `&(*pump).render` 不会与持有整个句柄的 `Box` 重叠。
    */
    unsafe {
        (*pump).mechanism.release_worker();
        drop(Box::from_raw(pump));
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Starts the pump thread. Returns `false` on a contract violation (already running, wrong thread)
/// or spawn failure.
///
/// ### 中文
/// 启动帧泵线程。若违反调用契约（已在运行、线程错误）或创建线程失败，返回 `false`。
pub unsafe extern "C" fn loading_screen_pump_initialize(pump: *mut LoadingScreenPump) -> bool {
    if pump.is_null() {
        return false;
    }
    unsafe { (*pump).mechanism.initialize() }.is_ok()
}

#[unsafe(no_mangle)]
/// ### English
/// Stops the pump thread and joins it. Blocks while the render thread still owes a submission.
/// Returns `false` only when called from the wrong thread.
///
/// ### 中文
/// 停止帧泵线程并 join。渲染线程仍欠一次提交时会阻塞。仅在从错误线程调用时返回 `false`。
pub unsafe extern "C" fn loading_screen_pump_shutdown(pump: *mut LoadingScreenPump) -> bool {
    if pump.is_null() {
        return false;
    }
    unsafe { (*pump).mechanism.shutdown() }.is_ok()
}

#[unsafe(no_mangle)]
/// ### English
/// Best-effort stop from any thread; `loading_screen_pump_shutdown` must still follow.
///
/// ### 中文
/// 可从任意线程调用的尽力停止；之后仍需调用 `loading_screen_pump_shutdown`。
pub unsafe extern "C" fn loading_screen_pump_request_stop(pump: *const LoadingScreenPump) {
    if pump.is_null() {
        return;
    }
    unsafe { (*pump).render.request_stop() };
}
