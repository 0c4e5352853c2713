//! # 子命令执行
//!
//! 每个子命令对应一个 `handle_*` 函数：校验位深、解析输出路径，
//! 通过 `image` 读写像素网格 (输出一律为 PNG)，调用编解码核心，
//! 再用带颜色的文字报告结果。

use crate::capacity::{BitDepth, capacity_bits};
use crate::cli::{
    CapacityArgs, EmbedImageArgs, ExtractImageArgs, HideArgs, HistogramArgs, RecoverArgs,
};
use crate::constants::{DOCTORED_PREFIX, MERGED_PREFIX, RECOVERED_PREFIX, REVEALED_PREFIX};
use crate::histogram::compute_histogram;
use crate::nibble::{embed_image, extract_image};
use crate::steganography::{PixelGrid, decode_message, encode_message};
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 读取图像并转换为 8 位 RGB 像素网格，alpha 通道被丢弃。
///
/// # Errors
///
/// 文件无法读取或不是受支持的图像格式时返回错误。
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image.to_rgb8())
}

/// 以 PNG 格式保存像素网格。
///
/// 无论目标扩展名是什么都使用 PNG 编码，保证隐藏的数据不被有损压缩破坏。
///
/// # Errors
///
/// 无法写入目标文件时返回错误。
pub fn save_grid(grid: &PixelGrid, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        warn!(
            "{} does not have a .png extension; it will still be written as PNG",
            path.display()
        );
    }

    grid.save_with_format(path, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                path.to_string_lossy().red().bold()
            )
        })
}

/// 确定输出路径，并在不允许覆盖时检查目标是否已存在。
///
/// 未指定 `explicit` 时，在 `input` 所在目录生成 `<prefix><文件名主干>.<extension>`。
///
/// # Errors
///
/// 目标文件已存在且 `force` 为 `false` 时返回错误。
pub fn resolve_output(
    input: &Path,
    explicit: Option<PathBuf>,
    prefix: &str,
    extension: &str,
    force: bool,
) -> Result<PathBuf> {
    let output = explicit.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        input.with_file_name(format!("{prefix}{stem}.{extension}"))
    });

    anyhow::ensure!(
        force || !output.exists(),
        "Output file already exists: {}\nUse --force to overwrite it.",
        output.to_string_lossy().red().bold()
    );

    Ok(output)
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责校验位深、读取图像和文本、调用隐写核心函数写入消息，
/// 最后将结果以 PNG 格式写入目标图像文件。消息超出容量时只打印警告，
/// 编码仍按截断后的内容进行。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与位深的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 位深不在 1 到 4 之间。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let bit_depth = BitDepth::new(args.bits)?;
    let dest = resolve_output(&args.image, args.dest, DOCTORED_PREFIX, "png", args.force)?;

    let message = match (args.message, &args.text) {
        (Some(message), _) => message,
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either a message or a text file must be provided."),
    };

    let mut grid = load_grid(&args.image)?;
    let report = encode_message(&mut grid, &message, bit_depth);

    if let Some(truncation) = report.truncation {
        eprintln!(
            "{} {}\nEncoding as much as possible...",
            "Warning:".yellow().bold(),
            truncation
        );
    }

    save_grid(&grid, &dest)?;

    println!(
        "The text has been successfully hidden ({} bits at bit depth {}) and saved: {}",
        report.bits_written.to_string().green(),
        bit_depth,
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、按给定位深提取低位并还原文本，
/// 最后将恢复的文本内容写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与位深的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 位深不在 1 到 4 之间。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let bit_depth = BitDepth::new(args.bits)?;
    let dest = resolve_output(&args.image, args.text, RECOVERED_PREFIX, "txt", args.force)?;

    let grid = load_grid(&args.image)?;
    let message = decode_message(&grid, bit_depth);

    fs::write(&dest, &message).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text ({} characters) has been successfully recovered and saved: {}",
        message.chars().count().to_string().green(),
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'EmbedImage' 命令的执行逻辑。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取载体或秘密图像。
/// * 两张图像尺寸不一致。
/// * 无法写入到目标图像文件。
pub fn handle_embed_image(args: EmbedImageArgs) -> Result<()> {
    let dest = resolve_output(&args.carrier, args.dest, MERGED_PREFIX, "png", args.force)?;

    let mut carrier = load_grid(&args.carrier)?;
    let secret = load_grid(&args.secret)?;

    embed_image(&mut carrier, &secret).with_context(|| {
        format!(
            "Unable to hide {} in {}",
            args.secret.to_string_lossy().red().bold(),
            args.carrier.to_string_lossy().red().bold()
        )
    })?;

    save_grid(&carrier, &dest)?;

    println!(
        "The image has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'ExtractImage' 命令的执行逻辑。
///
/// 还原结果只包含原秘密图像每个通道的高 4 位。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 无法写入到目标图像文件。
pub fn handle_extract_image(args: ExtractImageArgs) -> Result<()> {
    let dest = resolve_output(&args.image, args.dest, REVEALED_PREFIX, "png", args.force)?;

    let merged = load_grid(&args.image)?;
    let revealed = extract_image(&merged);
    save_grid(&revealed, &dest)?;

    println!(
        "The hidden image has been successfully extracted and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Histogram' 命令的执行逻辑，打印各通道的低位分布报告。
///
/// # Errors
///
/// 位深不在 1 到 4 之间或无法读取图像时返回错误。
pub fn handle_histogram(args: HistogramArgs) -> Result<()> {
    let bit_depth = BitDepth::new(args.bits)?;
    let grid = load_grid(&args.image)?;
    let histogram = compute_histogram(&grid, bit_depth);

    println!(
        "LSB histogram of {} ({} pixels):",
        args.image.to_string_lossy().green().bold(),
        histogram.total_pixels
    );
    print!("{histogram}");
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// # Errors
///
/// 位深不在 1 到 4 之间或无法读取图像时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let bit_depth = BitDepth::new(args.bits)?;
    let grid = load_grid(&args.image)?;
    let (width, height) = grid.dimensions();
    let bits = capacity_bits(width, height, bit_depth);

    println!(
        "{} ({}x{}) at bit depth {}: {} bits, up to {} characters",
        args.image.to_string_lossy().green().bold(),
        width,
        height,
        bit_depth,
        bits.to_string().green().bold(),
        (bits / 8).saturating_sub(1).to_string().green().bold()
    );
    Ok(())
}
