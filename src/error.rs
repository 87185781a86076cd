//! # 错误类型
//!
//! 隐写核心的所有失败都以 [`StegoError`] 返回，核心本身从不打印或退出进程。

use thiserror::Error;

/// 编码、解码及容量检查过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum StegoError {
    /// `lsb` 不在 1..=8 范围内。
    #[error("invalid lsb value {lsb}: must be between 1 and 8")]
    InvalidParameter { lsb: u8 },

    /// 长度头部与载荷超出了图像在该比特深度下的容量。
    #[error(
        "payload of {requested_bytes} bytes does not fit: only {available_bytes} bytes available at lsb {lsb}"
    )]
    CapacityExceeded {
        available_bytes: u64,
        requested_bytes: u64,
        lsb: u8,
    },

    /// 图像连 32 位长度头部都放不下。
    #[error("image too small: {total_bits} bits available, the length header alone needs 32")]
    ImageTooSmall { total_bits: u64 },

    /// 头部声明的长度超出了图像能容纳的数据量。
    #[error(
        "declared payload length {declared} exceeds image capacity of {available_bytes} bytes (wrong lsb or no hidden data?)"
    )]
    InvalidDeclaredLength { declared: u32, available_bytes: u64 },

    #[error("image codec error: {0}")]
    Container(#[from] image::ImageError),

    /// 有损或未启用的图像格式。
    #[error("unsupported carrier format: {0}")]
    UnsupportedFormat(String),
}
