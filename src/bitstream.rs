//! # 位流模块
//!
//! [`BitStream`] 是建立在 `bitvec` 之上的 MSB 优先位缓冲区。
//! 字节按顺序展开，每个字节的最高位最先出现。
//! 追加为均摊 O(1)，按下标读取 1..=32 位为一次 `load_be`。

use bitvec::prelude::*;

/// MSB 优先的位序列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: BitVec<u8, Msb0>,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预分配可容纳 `bits` 位的空位流。
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// 将字节序列展开为 `8 * bytes.len()` 位，每个字节 MSB 优先。
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bits: BitVec::from_vec(bytes.to_vec()),
        }
    }

    /// 有效位数。
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// 读取第 `index` 位。
    ///
    /// # Panics
    ///
    /// `index >= len()` 时 panic。
    #[inline]
    pub fn bit(&self, index: usize) -> u8 {
        u8::from(self.bits[index])
    }

    /// 从 `start` 开始读取 `count` 个连续位，先读到的位作为结果的最高位。
    ///
    /// # Panics
    ///
    /// `count > 32` 或读取范围超出位流末尾时 panic。
    pub fn take(&self, start: usize, count: usize) -> u32 {
        assert!(count <= 32, "cannot take more than 32 bits at once");
        let group = &self.bits[start..start + count];
        if group.is_empty() {
            return 0;
        }
        group.load_be::<u32>()
    }

    /// 追加 `value` 的低 `count` 位，MSB 优先。
    #[inline]
    pub fn push_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        self.bits
            .extend_from_bitslice(&value.view_bits::<Msb0>()[32 - count..]);
    }

    #[inline]
    pub fn push_bit(&mut self, bit: u8) {
        self.bits.push(bit & 1 == 1);
    }

    /// 丢弃 `bits` 之后的所有位。`bits >= len()` 时不做任何事。
    pub fn truncate(&mut self, bits: usize) {
        self.bits.truncate(bits);
    }

    /// 按 8 位一组重新组合的完整字节。
    ///
    /// 末尾不足 8 位的残余分组不属于有效输入，不会被返回。
    pub fn to_bytes(&self) -> &[u8] {
        &self.bits.as_raw_slice()[..self.bits.len() / 8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_bytes_msb_first() {
        let stream = BitStream::from_bytes(&[0b0100_0001, 0xFF]);
        assert_eq!(stream.len(), 16);
        let bits: Vec<u8> = (0..8).map(|i| stream.bit(i)).collect();
        assert_eq!(bits, [0, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(stream.bit(8), 1);
    }

    #[test]
    fn take_reads_across_byte_boundaries() {
        let stream = BitStream::from_bytes(&[0b1010_1100, 0b0101_0011]);
        assert_eq!(stream.take(0, 3), 0b101);
        assert_eq!(stream.take(6, 4), 0b0001);
        assert_eq!(stream.take(12, 4), 0b0011);
        assert_eq!(stream.take(3, 10), 0b01_1000_1010);
        assert_eq!(stream.take(5, 0), 0);
    }

    #[test]
    #[should_panic]
    fn take_past_end_panics() {
        BitStream::from_bytes(&[0xAA]).take(6, 3);
    }

    #[test]
    fn push_bits_packs_groups() {
        let mut stream = BitStream::with_capacity(12);
        stream.push_bits(0b010, 3);
        stream.push_bits(0b000, 3);
        stream.push_bits(0b01, 2);
        stream.push_bits(0b0110, 4);
        assert_eq!(stream.len(), 12);
        assert_eq!(stream.to_bytes(), &[0b0100_0001]);
        assert_eq!(stream.take(8, 4), 0b0110);
    }

    #[test]
    fn truncate_then_push_overwrites_dropped_tail() {
        let mut stream = BitStream::from_bytes(&[0xFF, 0xFF]);
        stream.truncate(12);
        assert_eq!(stream.len(), 12);
        assert_eq!(stream.take(8, 4), 0b1111);

        stream.truncate(10);
        stream.push_bits(0, 2);
        assert_eq!(stream.take(8, 4), 0b1100);

        stream.truncate(100);
        assert_eq!(stream.len(), 12);
    }

    #[test]
    fn to_bytes_ignores_partial_tail() {
        let mut stream = BitStream::from_bytes(&[0x41]);
        stream.push_bits(0b11, 2);
        assert_eq!(stream.to_bytes(), &[0x41]);
    }
}
