//! # LSB 通道编解码模块
//!
//! 把位流写入每个像素 R、G、B 三个通道的低 `bit_depth` 位，或反向读出。
//! 像素按光栅顺序 (逐行、从左到右) 遍历，直接操作图像的交错样本缓冲区，
//! 其字节顺序恰好就是 R, G, B, R, G, B ... 的遍历顺序。

use image::RgbImage;
use log::{debug, info, warn};

use crate::bitstream::BitStream;
use crate::capacity::{BitDepth, capacity_bits, plan_encoding};
use crate::error::Truncation;
use crate::framer::{frame, has_embedded_terminator, narrowed_chars, unframe};

/// 编解码使用的像素网格：8 位 RGB，行优先存储。
pub type PixelGrid = RgbImage;

/// 一次消息编码的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    /// 实际写入图像的位数。
    pub bits_written: usize,
    /// 消息超出容量时的截断提示。
    pub truncation: Option<Truncation>,
}

/// 将位流按光栅顺序写入各通道的低位，返回写入的位数。
///
/// 每个通道消耗至多 `bit_depth` 位。位流耗尽后立即停止，
/// 之后的通道 (包括同一像素中靠后的通道) 保持不变。
/// 若最后一组不足 `bit_depth` 位，则按其数值写入低位 (右对齐)，
/// 该通道的低 `bit_depth` 位仍会被整体清零。
pub fn embed_bits(grid: &mut PixelGrid, bits: &BitStream, bit_depth: BitDepth) -> usize {
    let width = bit_depth.bits();
    let keep = !bit_depth.mask();
    let samples: &mut [u8] = grid;

    let mut cursor = 0;
    for sample in samples.iter_mut() {
        let remaining = bits.len() - cursor;
        if remaining == 0 {
            break;
        }
        let count = remaining.min(width);
        let value = bits.take(cursor, count) as u8;
        *sample = (*sample & keep) | value;
        cursor += count;
    }
    cursor
}

/// 按光栅顺序读出整张图像每个通道的低 `bit_depth` 位。
///
/// 解码端不知道编码在哪里停止，因此总是遍历全部像素。
pub fn extract_bits(grid: &PixelGrid, bit_depth: BitDepth) -> BitStream {
    let samples: &[u8] = grid;
    let mask = bit_depth.mask();
    let width = bit_depth.bits();

    let mut bits = BitStream::with_capacity(samples.len() * width);
    for &sample in samples {
        bits.push_bits(u32::from(sample & mask), width);
    }
    bits
}

/// 将文本消息隐藏到图像中 (原地修改 `grid`)。
///
/// 消息先追加结束标记，再按容量规划决定是否截断；截断不会中止编码，
/// 而是通过返回值中的 [`Truncation`] 告知调用方，同时记录一条警告。
/// 结果必须以无损格式保存，否则隐藏的数据会被破坏。
pub fn encode_message(grid: &mut PixelGrid, message: &str, bit_depth: BitDepth) -> EmbedReport {
    let (width, height) = grid.dimensions();
    debug!("Encoding {} characters at bit depth {bit_depth}", message.chars().count());

    let narrowed = narrowed_chars(message);
    if narrowed > 0 {
        warn!("{narrowed} characters are outside Latin-1 and will be narrowed to 8 bits");
    }
    if has_embedded_terminator(message) {
        warn!("Message contains a NUL character; decoding will stop at it");
    }

    let message_bits = BitStream::from_bytes(&frame(message));
    let capacity = capacity_bits(width, height, bit_depth);
    debug!(
        "Image {width}x{height}: capacity {capacity} bits, message {} bits",
        message_bits.len()
    );

    let plan = plan_encoding(message_bits, capacity);
    if let Some(truncation) = plan.truncation {
        warn!("{truncation}. Encoding as much as possible");
    }

    let bits_written = embed_bits(grid, &plan.bits, bit_depth);
    info!("Encoded {bits_written} bits into {width}x{height} image");

    EmbedReport {
        bits_written,
        truncation: plan.truncation,
    }
}

/// 从图像中还原文本消息。
///
/// 在第一个结束标记处停止；找不到结束标记时返回能解出的全部字符，
/// 因此无法区分“没有消息”和“消息未结束”。
pub fn decode_message(grid: &PixelGrid, bit_depth: BitDepth) -> String {
    debug!("Decoding message at bit depth {bit_depth}");
    let bits = extract_bits(grid, bit_depth);
    let message = unframe(bits.to_bytes());
    info!("Decoded {} characters", message.chars().count());
    message
}
