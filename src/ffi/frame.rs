//! ### English
//! C ABI bindings for the render-thread collaborator (draw-pass flag).
//!
//! ### 中文
//! 供渲染线程协作者使用的 C ABI 绑定（draw-pass 标记）。

use super::LoadingScreenPump;

#[unsafe(no_mangle)]
/// ### English
/// Returns whether a produced UI frame awaits submission. NULL returns `false`.
///
/// ### 中文
/// 返回是否有已生产的 UI 帧等待提交。传入 NULL 时返回 `false`。
pub unsafe extern "C" fn loading_screen_pump_is_draw_pass_enqueued(
    pump: *const LoadingScreenPump,
) -> bool {
    if pump.is_null() {
        return false;
    }
    unsafe { (*pump).render.is_draw_pass_enqueued() }
}

#[unsafe(no_mangle)]
/// ### English
/// Hands the frame back to the pump after it was submitted.
///
/// ### 中文
/// 提交完成后将帧交还给帧泵。
pub unsafe extern "C" fn loading_screen_pump_reset_draw_pass_enqueued(
    pump: *const LoadingScreenPump,
) {
    if pump.is_null() {
        return;
    }
    unsafe { (*pump).render.reset_draw_pass_enqueued() };
}

#[unsafe(no_mangle)]
/// ### English
/// Returns whether the pump loop has not been asked to stop.
///
/// ### 中文
/// 返回帧泵循环是否尚未被要求停止。
pub unsafe extern "C" fn loading_screen_pump_is_main_loop_running(
    pump: *const LoadingScreenPump,
) -> bool {
    if pump.is_null() {
        return false;
    }
    unsafe { (*pump).render.is_main_loop_running() }
}
