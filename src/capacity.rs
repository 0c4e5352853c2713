//! # 容量规划模块
//!
//! 定义经过校验的 [`BitDepth`]，计算图像可嵌入的位数，
//! 并在消息超出容量时决定截断方式。

use std::fmt;

use crate::bitstream::BitStream;
use crate::constants::{CHANNELS, MAX_BIT_DEPTH, MIN_BIT_DEPTH};
use crate::error::{StegoError, Truncation};

/// 每个通道使用的低位数，保证位于 [1, 4]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    /// 校验并构造位深。
    ///
    /// # Errors
    ///
    /// `value` 不在 [1, 4] 内时返回 [`StegoError::InvalidParameter`]。
    pub fn new(value: i64) -> Result<Self, StegoError> {
        if (i64::from(MIN_BIT_DEPTH)..=i64::from(MAX_BIT_DEPTH)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(StegoError::InvalidParameter { bit_depth: value })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 位数，便于与位流长度做运算。
    pub fn bits(self) -> usize {
        usize::from(self.0)
    }

    /// 低 `bit_depth` 位全为 1 的掩码，即 `2^bit_depth - 1`。
    pub fn mask(self) -> u8 {
        (1u8 << self.0) - 1
    }

    /// 每个通道可取的低位模式数，即直方图的分箱数。
    pub fn levels(self) -> usize {
        1 << self.0
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self(MIN_BIT_DEPTH)
    }
}

impl TryFrom<i64> for BitDepth {
    type Error = StegoError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 图像在给定位深下可嵌入的总位数：`width * height * 3 * bit_depth`。
pub fn capacity_bits(width: u32, height: u32, bit_depth: BitDepth) -> usize {
    width as usize * height as usize * CHANNELS * bit_depth.bits()
}

/// 规划结果：实际要写入的位流，以及是否发生了截断。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingPlan {
    pub bits: BitStream,
    pub truncation: Option<Truncation>,
}

impl EncodingPlan {
    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }
}

/// 按容量裁剪消息位流。
///
/// 消息不超过容量时原样保留；否则只保留前 `capacity_bits` 位
/// (不保证字节对齐) 并附带 [`Truncation`] 提示。截断从不视为错误。
pub fn plan_encoding(mut message_bits: BitStream, capacity_bits: usize) -> EncodingPlan {
    let message_len = message_bits.len();
    if message_len <= capacity_bits {
        return EncodingPlan {
            bits: message_bits,
            truncation: None,
        };
    }

    message_bits.truncate(capacity_bits);
    EncodingPlan {
        bits: message_bits,
        truncation: Some(Truncation {
            message_bits: message_len,
            capacity_bits,
        }),
    }
}
