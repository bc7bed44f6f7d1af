//! # PNG 编码模块
//!
//! PNG 为无损格式，同一 `MaskedIcon` 多次编码得到的字节完全一致，
//! 解码后与内存中的像素逐字节相同。

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use super::{FaviconError, MaskedIcon};

/// 将图标编码为 PNG 字节。
pub fn encode_png(icon: &MaskedIcon) -> Result<Vec<u8>, FaviconError> {
    let mut buffer = Vec::new();
    icon.pixels()
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| FaviconError::Encode {
            size: icon.size(),
            message: e.to_string(),
        })?;

    log::debug!("🗜️ PNG 编码完成 - 尺寸: {} 字节: {}", icon.size(), buffer.len());
    Ok(buffer)
}

/// 将 PNG 字节解码回 RGBA，用于输出校验。
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, FaviconError> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map(|img| img.to_rgba8())
        .map_err(|e| FaviconError::Decode(format!("PNG 解码失败：{}", e)))
}
