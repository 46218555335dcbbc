#[unsafe(no_mangle)]
/// ### English
/// Returns the C ABI version.
///
/// ### 中文
/// 返回 C ABI 版本号。
pub extern "C" fn loading_screen_pump_abi_version() -> u32 {
    super::LOADING_SCREEN_PUMP_ABI_VERSION
}
