//! # 容量检查
//!
//! 纯函数，既可作为编码前的守卫，也可用于回答“这个载荷放得下吗”。

use crate::constants::{CHANNELS, HEADER_BITS};
use crate::cursor::Lsb;
use crate::error::StegoError;

/// 图像在给定比特深度下可用的全部比特数 (含头部)：`W * H * 3 * lsb`。
pub fn total_bits(width: u32, height: u32, lsb: Lsb) -> u64 {
    u64::from(width) * u64::from(height) * CHANNELS * lsb.bits()
}

/// 扣除长度头部后可存放的载荷字节数。
///
/// 头部是 32 位，因此结果不会超过 `u32::MAX`；连头部都放不下时为 0。
pub fn capacity_bytes(width: u32, height: u32, lsb: Lsb) -> u64 {
    let payload_bits = total_bits(width, height, lsb).saturating_sub(HEADER_BITS);
    (payload_bits / 8).min(u64::from(u32::MAX))
}

/// 检查 `payload_len` 字节的载荷能否连同头部写入 `width x height` 的图像。
///
/// # Errors
///
/// * `lsb` 超出 1..=8 时返回 [`StegoError::InvalidParameter`]。
/// * 容量不足 (包括图像连头部都放不下) 时返回 [`StegoError::CapacityExceeded`]。
pub fn check_capacity(
    width: u32,
    height: u32,
    payload_len: usize,
    lsb: u8,
) -> Result<(), StegoError> {
    let lsb = Lsb::new(lsb)?;
    let requested_bytes = payload_len as u64;

    let fits = total_bits(width, height, lsb)
        .checked_sub(HEADER_BITS)
        .zip(requested_bytes.checked_mul(8))
        .is_some_and(|(available, requested)| available >= requested)
        && requested_bytes <= u64::from(u32::MAX);

    if fits {
        Ok(())
    } else {
        Err(StegoError::CapacityExceeded {
            available_bytes: capacity_bytes(width, height, lsb),
            requested_bytes,
            lsb: lsb.get(),
        })
    }
}
