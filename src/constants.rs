/// 长度头部占用的比特数。
/// 载荷的字节长度以 `u32` 形式、最低位优先写入比特流的最前面。
pub const HEADER_BITS: u64 = 32;

/// 每个像素中用于存储数据的颜色通道数 (R, G, B)。Alpha 通道从不使用。
pub const CHANNELS: u64 = 3;

/// 每个通道允许使用的最少低位比特数。
pub const MIN_LSB: u8 = 1;

/// 每个通道允许使用的最多低位比特数。
pub const MAX_LSB: u8 = 8;

/// 未指定 `--lsb` 时使用的默认比特深度。
pub const DEFAULT_LSB: u8 = 1;

/// 隐藏命令默认输出文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 恢复命令默认输出文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";
