//! # 比特位置游标
//!
//! 将比特流中的全局下标映射到 `(x, y, 通道, 位移)`。
//! 扫描顺序：位平面由低到高变化最快，其次是通道 R → G → B，然后是列，最后是行。
//!
//! 编码与解码共享同一个 [`BitCursor`]，因此二者的遍历顺序不可能出现偏差。

use crate::constants::{CHANNELS, MAX_LSB, MIN_LSB};
use crate::error::StegoError;

/// 每个通道用于存储数据的低位比特数，保证位于 1..=8。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lsb(u8);

impl Lsb {
    /// 校验并构造比特深度。
    ///
    /// # Errors
    ///
    /// 当 `bits` 不在 1..=8 范围内时返回 [`StegoError::InvalidParameter`]。
    pub fn new(bits: u8) -> Result<Self, StegoError> {
        if (MIN_LSB..=MAX_LSB).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(StegoError::InvalidParameter { lsb: bits })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub(crate) fn bits(self) -> u64 {
        u64::from(self.0)
    }
}

impl TryFrom<u8> for Lsb {
    type Error = StegoError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

/// 承载数据的颜色通道。Alpha 不在其中。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    const ORDER: [Channel; CHANNELS as usize] = [Channel::Red, Channel::Green, Channel::Blue];

    /// 该通道在 RGBA 像素中的下标。
    pub fn index(self) -> usize {
        self as usize
    }

    fn from_step(step: u64) -> Self {
        Self::ORDER[(step % CHANNELS) as usize]
    }

    fn next(self) -> Option<Self> {
        match self {
            Channel::Red => Some(Channel::Green),
            Channel::Green => Some(Channel::Blue),
            Channel::Blue => None,
        }
    }
}

/// 单个比特在像素网格中的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPosition {
    pub x: u32,
    pub y: u32,
    pub channel: Channel,
    /// 通道值内的比特位 (0 为最低位)。
    pub shift: u8,
}

/// 针对固定宽度与比特深度的位置游标。
///
/// 游标本身不知道图像高度：越过最后一行的读写必须由上游的容量检查阻止。
#[derive(Debug, Clone, Copy)]
pub struct BitCursor {
    width: u32,
    lsb: Lsb,
}

impl BitCursor {
    /// `width` 必须大于 0。
    pub fn new(width: u32, lsb: Lsb) -> Self {
        Self { width, lsb }
    }

    /// 闭式计算第 `index` 个比特的位置。
    pub fn locate(&self, index: u64) -> BitPosition {
        let lsb = self.lsb.bits();
        let width = u64::from(self.width);
        let pixel = index / (lsb * CHANNELS);

        BitPosition {
            x: (pixel % width) as u32,
            y: (pixel / width) as u32,
            channel: Channel::from_step(index / lsb),
            shift: (index % lsb) as u8,
        }
    }

    /// 从第 `start` 个比特开始逐步前进的迭代器。
    pub fn positions(&self, start: u64) -> Positions {
        Positions {
            next: self.locate(start),
            width: self.width,
            lsb: self.lsb.get(),
        }
    }
}

/// [`BitCursor::positions`] 返回的无界迭代器。
#[derive(Debug, Clone)]
pub struct Positions {
    next: BitPosition,
    width: u32,
    lsb: u8,
}

impl Positions {
    fn advance(&mut self) {
        let pos = &mut self.next;

        pos.shift += 1;
        if pos.shift < self.lsb {
            return;
        }
        pos.shift = 0;

        if let Some(channel) = pos.channel.next() {
            pos.channel = channel;
            return;
        }
        pos.channel = Channel::Red;

        pos.x += 1;
        if pos.x < self.width {
            return;
        }
        pos.x = 0;
        pos.y += 1;
    }
}

impl Iterator for Positions {
    type Item = BitPosition;

    fn next(&mut self) -> Option<BitPosition> {
        let current = self.next;
        self.advance();
        Some(current)
    }
}
