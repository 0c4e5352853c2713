//! # 消息成帧模块
//!
//! 文本消息与以 0 结尾的字节序列之间的转换。
//! 每个字符按码点截取低 8 位，因此只有 Latin-1 范围内的字符能无损往返；
//! 超出范围的字符由调用方负责。消息内部的 NUL 字符会提前终止解码，
//! 这是格式本身的限制。

use crate::constants::TERMINATOR;

/// 将消息编码为字节并追加一个结束标记。
pub fn frame(message: &str) -> Vec<u8> {
    message
        .chars()
        .map(|c| u32::from(c) as u8)
        .chain(std::iter::once(TERMINATOR))
        .collect()
}

/// 从字节序列还原消息，在第一个结束标记处停止 (不含该标记)。
///
/// 没有遇到结束标记时返回已解码的全部字符。
pub fn unframe(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != TERMINATOR)
        .map(|&b| char::from(b))
        .collect()
}

/// 消息中码点超出 8 位、会在成帧时被截断的字符数。
pub fn narrowed_chars(message: &str) -> usize {
    message.chars().filter(|&c| u32::from(c) > 0xFF).count()
}

/// 消息中是否含有会被误认为结束标记的字符。
pub fn has_embedded_terminator(message: &str) -> bool {
    message.chars().any(|c| u32::from(c) & 0xFF == u32::from(TERMINATOR))
}
