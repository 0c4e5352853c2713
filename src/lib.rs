//! # lsb_stego 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：
//! 可变位深的文本隐写、固定 4 位的图中图隐写，以及低位直方图分析。
//! 隐写不提供任何保密性，知道方案的人可以直接读出数据。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod framer;
pub mod handler;
pub mod histogram;
pub mod logging;
pub mod nibble;
pub mod steganography;

pub use capacity::BitDepth;
pub use error::{StegoError, Truncation};
pub use steganography::PixelGrid;
