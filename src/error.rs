//! # 错误类型模块
//!
//! 编解码核心只会产生两类致命错误；容量不足导致的截断不是错误，
//! 而是随编码结果一起返回的 [`Truncation`] 提示。

use std::fmt;
use thiserror::Error;

use crate::constants::{MAX_BIT_DEPTH, MIN_BIT_DEPTH};

/// 隐写编解码过程中可能出现的错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StegoError {
    /// 位深不在 [1, 4] 范围内。在访问任何像素之前检查。
    #[error(
        "invalid bit depth {bit_depth}: must be between {} and {}",
        MIN_BIT_DEPTH,
        MAX_BIT_DEPTH
    )]
    InvalidParameter { bit_depth: i64 },

    /// 图中图模式要求载体与秘密图像尺寸完全一致。
    #[error(
        "carrier ({}x{}) and secret ({}x{}) images must be the same size",
        .carrier.0, .carrier.1, .secret.0, .secret.1
    )]
    SizeMismatch {
        carrier: (u32, u32),
        secret: (u32, u32),
    },
}

/// 消息超出图像容量时附带返回的截断提示。
///
/// 编码仍然会进行，只写入前 `capacity_bits` 位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// 成帧后消息的总位数 (包含结束标记)。
    pub message_bits: usize,
    /// 图像在当前位深下能容纳的位数。
    pub capacity_bits: usize,
}

impl Truncation {
    /// 图像可完整容纳的字符数。
    pub fn capacity_chars(&self) -> usize {
        self.capacity_bits / 8
    }

    /// 被丢弃的尾部位数。
    pub fn dropped_bits(&self) -> usize {
        self.message_bits - self.capacity_bits
    }
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "message is too large for this image ({} bits, capacity {} bits); \
             the image can hold only {} characters, {} bits were dropped",
            self.message_bits,
            self.capacity_bits,
            self.capacity_chars(),
            self.dropped_bits()
        )
    }
}
