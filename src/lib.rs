//! # lsb_stego 库
//!
//! 本库包含位平面 LSB 隐写的核心逻辑：比特位置游标、容量检查、编码与解码，
//! 以及命令行工具所需的图像容器转换和命令处理。
//!
//! 核心函数只操作内存中的 [`image::RgbaImage`]，不做任何 I/O，也不打印日志。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod container;
pub mod cursor;
pub mod error;
pub mod handler;
pub mod steganography;

pub use capacity::check_capacity;
pub use error::StegoError;
pub use steganography::{decode, encode};
