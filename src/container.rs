//! # 图像容器
//!
//! 在文件字节与 RGBA 像素网格之间转换。只接受无损格式，
//! 有损压缩会破坏低位中的数据。

use crate::error::StegoError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// 可作为载体的无损格式。
const LOSSLESS_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];

/// 将图像文件字节解码为 RGBA 像素网格。
pub fn decode_container(bytes: &[u8]) -> Result<RgbaImage, StegoError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// 将像素网格编码为 `format` 格式的文件字节。
pub fn encode_container(grid: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, StegoError> {
    ensure_lossless(format)?;
    let mut out = Vec::new();
    grid.write_to(&mut Cursor::new(&mut out), format)?;
    Ok(out)
}

/// 根据扩展名确定输出格式，并拒绝有损或未启用的格式。
pub fn carrier_format(path: &Path) -> Result<ImageFormat, StegoError> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        StegoError::UnsupportedFormat(path.to_string_lossy().into_owned())
    })?;
    ensure_lossless(format)?;
    Ok(format)
}

fn ensure_lossless(format: ImageFormat) -> Result<(), StegoError> {
    if LOSSLESS_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(StegoError::UnsupportedFormat(format!("{format:?}")))
    }
}
