//! # 命令行参数定义
//!
//! 文本隐写 (`hide`/`recover`)、图中图 (`embed-image`/`extract-image`)
//! 与分析 (`histogram`/`capacity`) 六个子命令的 `clap` 定义，
//! 外加对所有子命令生效的日志选项。

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可在无损格式图像 (如 PNG, BMP) 中隐藏文本或另一张图像，并分析图像低位的统计特征。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可在无损格式图像 (如 PNG, BMP) 中隐藏文本或另一张图像，并分析图像低位的统计特征。\n\n输出图像始终以 PNG 保存；经有损格式 (如 JPEG) 再次保存会破坏隐藏的数据。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 额外将日志追加写入此文件。
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// 输出更详细的日志 (-v 信息, -vv 调试, -vvv 跟踪)。
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// 只输出错误日志。
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏一段文本。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 将一张图像的高 4 位隐藏到同尺寸载体图像的低 4 位中。
    EmbedImage(EmbedImageArgs),

    /// 从合成图像中还原被隐藏图像的高 4 位。
    ExtractImage(ExtractImageArgs),

    /// 统计每个颜色通道低位取值的直方图、均值和标准差。
    Histogram(HistogramArgs),

    /// 显示图像在指定位深下能容纳的位数与字符数。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["message", "text"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 直接在命令行给出要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 每个颜色通道使用的低位数 (1-4)。
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub bits: i64,

    /// 隐写完成后保存结果图像的输出路径，默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏时使用的低位数 (1-4)。
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub bits: i64,

    /// 恢复文本后保存文本内容的输出路径，默认为图像旁的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'embed-image' 命令所需的参数。
#[derive(Args, Debug)]
pub struct EmbedImageArgs {
    /// 载体图像文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 要隐藏的图像文件路径，尺寸必须与载体相同。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 合成图像的输出路径，默认为载体旁的 `merged_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract-image' 命令所需的参数。
#[derive(Args, Debug)]
pub struct ExtractImageArgs {
    /// 合成图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 还原图像的输出路径，默认为输入旁的 `revealed_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'histogram' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HistogramArgs {
    /// 要分析的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 统计的低位数 (1-4)。
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub bits: i64,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 每个颜色通道使用的低位数 (1-4)。
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub bits: i64,
}
