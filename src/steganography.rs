//! # 隐写核心
//!
//! 在 RGBA 像素网格的 R/G/B 通道低位中写入或读出载荷。
//! 比特流格式：前 32 位为载荷字节长度 (最低位优先)，随后是每个载荷字节 (同样最低位优先)。

use crate::bitstream::{from_lsb_first_bits, payload_bits, stream_len};
use crate::capacity::{capacity_bytes, check_capacity, total_bits};
use crate::constants::HEADER_BITS;
use crate::cursor::{BitCursor, BitPosition, Lsb};
use crate::error::StegoError;
use image::RgbaImage;

/// 将 `payload` 隐藏进 `grid` 的副本中并返回该副本。
///
/// 源图像不会被修改；输出图像中除 R/G/B 的低 `lsb` 位以外的所有比特 (包括 Alpha) 都与源图像相同。
///
/// # Errors
///
/// * [`StegoError::InvalidParameter`]：`lsb` 不在 1..=8。
/// * [`StegoError::CapacityExceeded`]：头部加载荷超出图像容量。
pub fn encode(grid: &RgbaImage, payload: &[u8], lsb: u8) -> Result<RgbaImage, StegoError> {
    let (width, height) = grid.dimensions();
    check_capacity(width, height, payload.len(), lsb)?;

    let lsb = Lsb::new(lsb)?;
    let declared = u32::try_from(payload.len()).map_err(|_| StegoError::CapacityExceeded {
        available_bytes: capacity_bytes(width, height, lsb),
        requested_bytes: payload.len() as u64,
        lsb: lsb.get(),
    })?;

    let mut output = grid.clone();
    let cursor = BitCursor::new(width, lsb);

    for (pos, bit) in cursor.positions(0).zip(payload_bits(declared, payload)) {
        write_bit(&mut output, pos, bit);
    }

    Ok(output)
}

/// 从 `grid` 中读出以相同 `lsb` 隐藏的载荷。
///
/// # Errors
///
/// * [`StegoError::InvalidParameter`]：`lsb` 不在 1..=8。
/// * [`StegoError::ImageTooSmall`]：图像放不下 32 位头部。
/// * [`StegoError::InvalidDeclaredLength`]：头部声明的长度超出图像容量，
///   通常意味着 `lsb` 不匹配或图像中没有隐藏数据。
pub fn decode(grid: &RgbaImage, lsb: u8) -> Result<Vec<u8>, StegoError> {
    let lsb = Lsb::new(lsb)?;
    let (width, height) = grid.dimensions();

    let total_bits = total_bits(width, height, lsb);
    if total_bits < HEADER_BITS {
        return Err(StegoError::ImageTooSmall { total_bits });
    }

    let mut positions = BitCursor::new(width, lsb).positions(0);

    let declared = from_lsb_first_bits(
        positions
            .by_ref()
            .take(HEADER_BITS as usize)
            .map(|pos| read_bit(grid, pos)),
    );

    if stream_len(u64::from(declared)) > total_bits {
        return Err(StegoError::InvalidDeclaredLength {
            declared,
            available_bytes: capacity_bytes(width, height, lsb),
        });
    }

    let payload = (0..declared)
        .map(|_| {
            from_lsb_first_bits(
                positions
                    .by_ref()
                    .take(u8::BITS as usize)
                    .map(|pos| read_bit(grid, pos)),
            ) as u8
        })
        .collect();

    Ok(payload)
}

fn write_bit(grid: &mut RgbaImage, pos: BitPosition, bit: bool) {
    let value = &mut grid.get_pixel_mut(pos.x, pos.y).0[pos.channel.index()];
    *value = (*value & !(1 << pos.shift)) | (u8::from(bit) << pos.shift);
}

fn read_bit(grid: &RgbaImage, pos: BitPosition) -> bool {
    (grid.get_pixel(pos.x, pos.y).0[pos.channel.index()] >> pos.shift) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    /// 可复现的伪随机图像，避免单元测试依赖随机数。
    fn noisy(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let seed = x.wrapping_mul(7919) ^ y.wrapping_mul(104_729);
            Rgba([
                (seed % 251) as u8,
                (seed.wrapping_mul(31) % 241) as u8,
                (seed.wrapping_mul(17) % 239) as u8,
                (seed % 200) as u8 + 55,
            ])
        })
    }

    #[test]
    fn test_hi_in_black_ten_by_ten() {
        let grid = solid(10, 10, [0, 0, 0, 255]);
        let encoded = encode(&grid, b"hi", 1).unwrap();
        assert_eq!(decode(&encoded, 1).unwrap(), b"hi");

        // Length 2 lands in bit 1 of the stream: pixel (0,0), green channel.
        assert_eq!(encoded.get_pixel(0, 0).0, [0, 1, 0, 255]);
    }

    #[test]
    fn test_roundtrip_every_depth() {
        let grid = noisy(23, 17);
        for bits in 1..=8u8 {
            let capacity = capacity_bytes(23, 17, Lsb::new(bits).unwrap()) as usize;
            let payload: Vec<u8> = (0..capacity).map(|i| (i * 37 + bits as usize) as u8).collect();

            let encoded = encode(&grid, &payload, bits).unwrap();
            assert_eq!(decode(&encoded, bits).unwrap(), payload, "lsb {bits}");
        }
    }

    #[test]
    fn test_empty_payload() {
        let grid = noisy(6, 6);
        let encoded = encode(&grid, &[], 2).unwrap();
        assert!(decode(&encoded, 2).unwrap().is_empty());
    }

    #[test]
    fn test_source_grid_untouched() {
        let grid = noisy(12, 12);
        let copy = grid.clone();
        let _ = encode(&grid, b"payload", 3).unwrap();
        assert_eq!(grid, copy);
    }

    #[test]
    fn test_only_low_bits_of_rgb_change() {
        let grid = noisy(20, 20);
        for bits in [1u8, 3, 7] {
            let encoded = encode(&grid, b"the quick brown fox", bits).unwrap();
            let high_mask = !((1u16 << bits) - 1) as u8;

            for (before, after) in grid.pixels().zip(encoded.pixels()) {
                assert_eq!(before.0[3], after.0[3], "alpha must be preserved");
                for c in 0..3 {
                    assert_eq!(before.0[c] & high_mask, after.0[c] & high_mask);
                }
            }
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let grid = noisy(15, 9);
        let a = encode(&grid, b"same input", 2).unwrap();
        let b = encode(&grid, b"same input", 2).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_capacity_boundary() {
        let grid = noisy(8, 8);
        // 8x8x3x1 = 192 bits, 160 after the header: 20 bytes.
        assert!(encode(&grid, &[0xAB; 20], 1).is_ok());
        assert!(matches!(
            encode(&grid, &[0xAB; 21], 1),
            Err(StegoError::CapacityExceeded {
                available_bytes: 20,
                requested_bytes: 21,
                lsb: 1,
            })
        ));
    }

    #[test]
    fn test_two_by_two_rejects_payload() {
        let grid = solid(2, 2, [10, 20, 30, 255]);
        assert!(matches!(
            encode(&grid, b"x", 1),
            Err(StegoError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            decode(&grid, 1),
            Err(StegoError::ImageTooSmall { total_bits: 12 })
        ));
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let grid = noisy(10, 10);
        assert!(matches!(
            encode(&grid, b"x", 0),
            Err(StegoError::InvalidParameter { lsb: 0 })
        ));
        assert!(matches!(
            decode(&grid, 9),
            Err(StegoError::InvalidParameter { lsb: 9 })
        ));
    }

    #[test]
    fn test_declared_length_beyond_capacity() {
        // All channels 0xFF: the header reads as u32::MAX.
        let grid = solid(10, 10, [255, 255, 255, 255]);
        assert!(matches!(
            decode(&grid, 1),
            Err(StegoError::InvalidDeclaredLength {
                declared: u32::MAX,
                available_bytes: 33,
            })
        ));
    }

    #[test]
    fn test_mismatched_depth_never_returns_payload() {
        let grid = noisy(32, 32);
        let payload = b"mismatched bit depth must not leak the payload".to_vec();
        let encoded = encode(&grid, &payload, 2).unwrap();

        for bits in [1u8, 3, 4, 8] {
            match decode(&encoded, bits) {
                Ok(recovered) => assert_ne!(recovered, payload, "lsb {bits}"),
                Err(StegoError::InvalidDeclaredLength { .. } | StegoError::ImageTooSmall { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}
