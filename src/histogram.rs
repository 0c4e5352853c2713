//! # 低位直方图分析模块
//!
//! 统计每个颜色通道低 `bit_depth` 位各取值出现的次数，
//! 并计算分箱下标分布的均值与总体标准差。自然图像的低位分布通常较为平滑，
//! 嵌入数据后会趋于均匀，可据此粗略判断图像是否被隐写。
//!
//! 本模块只产出数值结果；图表绘制由外部工具负责，
//! [`fmt::Display`] 实现提供一份纯文本报告。

use std::fmt;

use log::debug;

use crate::capacity::BitDepth;
use crate::constants::CHANNELS;
use crate::steganography::PixelGrid;

/// 颜色通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        };
        f.write_str(name)
    }
}

/// 单个通道的直方图及其统计量。
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHistogram {
    /// `2^bit_depth` 个分箱，下标即低位取值。
    pub bins: Vec<u64>,
    pub mean: f64,
    /// 总体标准差 (除以像素总数，而非 n - 1)。
    pub std_dev: f64,
}

impl ChannelHistogram {
    /// 由分箱计数计算均值和标准差。像素总数为 0 时两者均为 0。
    pub fn from_bins(bins: Vec<u64>, total_pixels: u64) -> Self {
        if total_pixels == 0 {
            return Self {
                bins,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let total = total_pixels as f64;
        let mean = bins
            .iter()
            .enumerate()
            .map(|(i, &count)| count as f64 * i as f64)
            .sum::<f64>()
            / total;
        let variance = bins
            .iter()
            .enumerate()
            .map(|(i, &count)| count as f64 * (i as f64 - mean).powi(2))
            .sum::<f64>()
            / total;

        Self {
            bins,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// 所有分箱计数之和，恒等于像素总数。
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }
}

/// 三个通道的低位直方图。
#[derive(Debug, Clone, PartialEq)]
pub struct LsbHistogram {
    pub bit_depth: BitDepth,
    pub total_pixels: u64,
    pub red: ChannelHistogram,
    pub green: ChannelHistogram,
    pub blue: ChannelHistogram,
}

impl LsbHistogram {
    /// 按 R, G, B 顺序返回各通道结果。
    pub fn channels(&self) -> [(Channel, &ChannelHistogram); CHANNELS] {
        [
            (Channel::Red, &self.red),
            (Channel::Green, &self.green),
            (Channel::Blue, &self.blue),
        ]
    }

    /// 各分箱的位模式标签，例如位深 2 时为 `00, 01, 10, 11`。
    pub fn labels(&self) -> Vec<String> {
        bit_pattern_labels(self.bit_depth)
    }
}

impl fmt::Display for LsbHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        for (channel, hist) in self.channels() {
            writeln!(f, "{channel} Channel - Last {} Bits", self.bit_depth)?;
            for (label, count) in labels.iter().zip(&hist.bins) {
                writeln!(f, "  {label}: {count}")?;
            }
        }
        for (channel, hist) in self.channels() {
            writeln!(
                f,
                "{channel} Channel - Mean: {:.2}, Std Dev: {:.2}",
                hist.mean, hist.std_dev
            )?;
        }
        Ok(())
    }
}

/// 位深为 `bit_depth` 时每个分箱下标的定宽二进制表示。
pub fn bit_pattern_labels(bit_depth: BitDepth) -> Vec<String> {
    let width = bit_depth.bits();
    (0..bit_depth.levels())
        .map(|i| format!("{i:0width$b}"))
        .collect()
}

/// 统计整张图像每个通道的低位直方图。
pub fn compute_histogram(grid: &PixelGrid, bit_depth: BitDepth) -> LsbHistogram {
    let mask = bit_depth.mask();
    let levels = bit_depth.levels();
    let mut bins = [vec![0u64; levels], vec![0u64; levels], vec![0u64; levels]];

    let samples: &[u8] = grid;
    for pixel in samples.chunks_exact(CHANNELS) {
        for (channel_bins, &value) in bins.iter_mut().zip(pixel) {
            channel_bins[usize::from(value & mask)] += 1;
        }
    }

    let (width, height) = grid.dimensions();
    let total_pixels = u64::from(width) * u64::from(height);
    debug!("Computed {levels}-bin histograms over {total_pixels} pixels");

    let [red, green, blue] = bins;
    LsbHistogram {
        bit_depth,
        total_pixels,
        red: ChannelHistogram::from_bins(red, total_pixels),
        green: ChannelHistogram::from_bins(green, total_pixels),
        blue: ChannelHistogram::from_bins(blue, total_pixels),
    }
}
