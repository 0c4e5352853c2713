//! # 图中图模块
//!
//! 把秘密图像每个通道的高 4 位写入同尺寸载体图像对应通道的低 4 位。
//! 没有成帧和容量检查，只要求两张图像尺寸一致。
//! 还原是有损的：秘密图像原来的低 4 位永久丢失，
//! 还原值恒等于 `secret & 0xF0`。

use log::{debug, info};

use crate::constants::{HIGH_NIBBLE_MASK, LOW_NIBBLE_MASK, NIBBLE_BITS};
use crate::error::StegoError;
use crate::steganography::PixelGrid;

/// 把 `secret` 的高半字节嫁接到 `carrier` 的低半字节 (原地修改 `carrier`)。
///
/// # Errors
///
/// 尺寸不一致时返回 [`StegoError::SizeMismatch`]，此时 `carrier` 不会被修改。
pub fn embed_image(carrier: &mut PixelGrid, secret: &PixelGrid) -> Result<(), StegoError> {
    if carrier.dimensions() != secret.dimensions() {
        return Err(StegoError::SizeMismatch {
            carrier: carrier.dimensions(),
            secret: secret.dimensions(),
        });
    }
    let (width, height) = carrier.dimensions();
    debug!("Embedding {width}x{height} secret image");

    let secret_samples: &[u8] = secret;
    let carrier_samples: &mut [u8] = carrier;
    carrier_samples
        .iter_mut()
        .zip(secret_samples)
        .for_each(|(c, &s)| *c = (*c & HIGH_NIBBLE_MASK) | (s >> NIBBLE_BITS));

    info!("Secret image embedded into {width}x{height} carrier");
    Ok(())
}

/// 从合成图像的低半字节还原秘密图像的高半字节。
pub fn extract_image(merged: &PixelGrid) -> PixelGrid {
    let (width, height) = merged.dimensions();
    let mut revealed = merged.clone();
    let samples: &mut [u8] = &mut revealed;
    samples
        .iter_mut()
        .for_each(|m| *m = (*m & LOW_NIBBLE_MASK) << NIBBLE_BITS);

    info!("Secret image extracted from {width}x{height} image");
    revealed
}
