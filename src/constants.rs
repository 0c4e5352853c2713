/// 每个像素参与隐写的颜色通道数 (R, G, B)。
pub const CHANNELS: usize = 3;

/// 允许的最小 LSB 位深。
pub const MIN_BIT_DEPTH: u8 = 1;

/// 允许的最大 LSB 位深。
/// 超过 4 位后载体图像的失真会肉眼可见。
pub const MAX_BIT_DEPTH: u8 = 4;

/// 消息结束标记，追加在每条消息之后。
pub const TERMINATOR: u8 = 0;

/// 图中图模式下保留载体高半字节的掩码。
pub const HIGH_NIBBLE_MASK: u8 = 0xF0;

/// 图中图模式下提取低半字节的掩码。
pub const LOW_NIBBLE_MASK: u8 = 0x0F;

/// 半字节的位宽。
pub const NIBBLE_BITS: u8 = 4;

/// 未指定输出路径时各子命令使用的文件名前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";
pub const RECOVERED_PREFIX: &str = "recovered_";
pub const MERGED_PREFIX: &str = "merged_";
pub const REVEALED_PREFIX: &str = "revealed_";
