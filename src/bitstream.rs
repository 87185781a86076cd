//! # 比特流
//!
//! 长度头部和载荷字节共用同一套规则：无符号整数按最低位优先展开为比特，
//! 读取时再按相同顺序累加回来。

use crate::constants::HEADER_BITS;

/// 将 `value` 的低 `width` 位按最低位优先展开。
pub fn lsb_first_bits(value: u32, width: u32) -> impl Iterator<Item = bool> {
    (0..width).map(move |bit| (value >> bit) & 1 == 1)
}

/// [`lsb_first_bits`] 的逆操作。
///
/// 最多消费 32 个比特；比特不足时缺失的高位视为 0。
pub fn from_lsb_first_bits(bits: impl IntoIterator<Item = bool>) -> u32 {
    bits.into_iter()
        .take(u32::BITS as usize)
        .enumerate()
        .fold(0, |acc, (i, bit)| acc | (u32::from(bit) << i))
}

/// 完整的比特流：32 位长度头部，随后是每个载荷字节的 8 个比特。
///
/// 调用方需要先保证 `payload.len()` 能放进 `u32`。
pub fn payload_bits(declared_len: u32, payload: &[u8]) -> impl Iterator<Item = bool> + '_ {
    lsb_first_bits(declared_len, HEADER_BITS as u32).chain(
        payload
            .iter()
            .flat_map(|&byte| lsb_first_bits(u32::from(byte), u8::BITS)),
    )
}

/// 比特流长度：`HEADER_BITS + payload_len * 8`。
pub fn stream_len(payload_len: u64) -> u64 {
    HEADER_BITS + payload_len * 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_bit_zero_first() {
        let bits: Vec<bool> = lsb_first_bits(0b1011, 32).collect();
        assert_eq!(bits.len(), 32);
        assert_eq!(&bits[..5], &[true, true, false, true, false]);
        assert!(bits[5..].iter().all(|&b| !b));
    }

    #[test]
    fn test_integer_roundtrip_shares_bit_order() {
        for value in [0, 1, 2, 0x8000_0000, 0xDEAD_BEEF, u32::MAX] {
            assert_eq!(from_lsb_first_bits(lsb_first_bits(value, 32)), value);
        }
    }

    #[test]
    fn test_partial_bits_leave_high_bits_clear() {
        assert_eq!(from_lsb_first_bits([true, false, true]), 5);
        assert_eq!(from_lsb_first_bits(std::iter::repeat(true)), u32::MAX);
    }

    #[test]
    fn test_payload_stream_layout() {
        // "h" = 0x68 = 0b0110_1000
        let bits: Vec<bool> = payload_bits(1, b"h").collect();
        assert_eq!(bits.len() as u64, stream_len(1));
        assert!(bits[0]);
        assert!(bits[1..32].iter().all(|&b| !b));
        assert_eq!(
            &bits[32..],
            &[false, false, false, true, false, true, true, false]
        );
    }
}
