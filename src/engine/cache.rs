//! ### English
//! Cache-line padding helpers for the shared pump state.
//!
//! The draw-pass flag is written by two threads (pump sets, render thread clears); keeping it on
//! its own line stops the statistics counters from bouncing it around.
//!
//! ### 中文
//! 共享帧泵状态使用的 cache line 填充工具。
//!
//! draw-pass 标记由两个线程写入（帧泵置位、渲染线程清除）；让它独占一条缓存行，
//! 避免统计计数器的写入把它来回弹动。

/// ### English
/// The cache line size we lay the shared state out for (bytes).
///
/// ### 中文
/// 共享状态布局所针对的 cache line 大小（字节）。
pub(crate) const CACHE_LINE_BYTES: usize = 64;

/// ### English
/// Padding bytes needed after `bytes_used` bytes to reach the next line boundary.
///
/// ### 中文
/// 已占用 `bytes_used` 字节后，推进到下一条缓存行边界所需的填充字节数。
#[inline]
pub(crate) const fn pad_to_cache_line(bytes_used: usize) -> usize {
    let rem = bytes_used % CACHE_LINE_BYTES;
    if rem == 0 { 0 } else { CACHE_LINE_BYTES - rem }
}

/// ### English
/// Padding after two fields (`A` then `B`).
///
/// ### 中文
/// 两个字段（先 `A` 后 `B`）之后的填充字节数。
#[inline]
pub(crate) const fn pad_after2<A, B>() -> usize {
    pad_to_cache_line(std::mem::size_of::<A>() + std::mem::size_of::<B>())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU64};

    use super::*;

    #[test]
    fn pads_fill_the_line() {
        assert_eq!(pad_to_cache_line(0), 0);
        assert_eq!(pad_to_cache_line(64), 0);
        assert_eq!(pad_to_cache_line(1), 63);
        assert_eq!(pad_after2::<AtomicBool, AtomicBool>(), 62);
        assert_eq!(pad_after2::<AtomicU64, AtomicU64>(), 48);
    }
}
