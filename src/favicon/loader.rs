//! # 源图加载与校验模块
//!
//! ## 设计思路
//!
//! 源图是整次运行唯一的输入，必须在任何输出动作之前完成加载与校验。
//! 目标是尽快失败：源图缺失时直接报告 `SourceNotFound`，不会触碰输出目录。
//!
//! ## 实现思路
//!
//! 1. 存在性检查
//! 2. metadata 体积限制
//! 3. 读取字节并做文件签名校验
//! 4. 仅读 header 获取宽高，按像素上限快速拒绝
//! 5. 完整解码并转换为 RGBA8

use image::ImageReader;
use std::io::Cursor;
use std::path::Path;

use super::{FaviconConfig, FaviconError, SourceImage};

/// 从配置的路径加载源图。
pub fn load_source(config: &FaviconConfig) -> Result<SourceImage, FaviconError> {
    let path = config.source_path.as_path();
    log::info!("📁 开始读取源图 - 路径: {}", path.display());

    if !path.exists() {
        return Err(FaviconError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path).map_err(|e| source_read_error(path, e))?;
    if metadata.len() > config.max_source_file_size {
        return Err(FaviconError::ResourceLimit(format!(
            "源图过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            config.max_source_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    let bytes = std::fs::read(path).map_err(|e| source_read_error(path, e))?;
    decode_source(path, &bytes, config)
}

fn source_read_error(path: &Path, source: std::io::Error) -> FaviconError {
    FaviconError::SourceRead {
        path: path.to_path_buf(),
        source,
    }
}

/// 将内存中的源图字节解码为 `SourceImage`。
pub fn decode_source(
    path: &Path,
    bytes: &[u8],
    config: &FaviconConfig,
) -> Result<SourceImage, FaviconError> {
    validate_image_signature(path, bytes)?;

    let (header_width, header_height) = inspect_dimensions(path, bytes)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory(bytes).map_err(|e| {
        FaviconError::Decode(format!("源图解码失败（{}）：{}", path.display(), e))
    })?;

    let pixels = decoded.to_rgba8();
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return Err(FaviconError::Decode(format!(
            "源图尺寸为空（{}）：{}x{}",
            path.display(),
            width,
            height
        )));
    }
    validate_pixel_limits(config, width, height)?;

    log::info!(
        "✅ 源图解码成功 - 路径: {} 尺寸: {}x{}",
        path.display(),
        width,
        height
    );

    Ok(SourceImage::from_rgba(path, pixels))
}

fn validate_image_signature(path: &Path, bytes: &[u8]) -> Result<(), FaviconError> {
    if bytes.is_empty() {
        return Err(FaviconError::Decode(format!(
            "源图内容为空：{}",
            path.display()
        )));
    }

    let kind = infer::get(bytes).ok_or_else(|| {
        FaviconError::Decode(format!("无法识别源图类型：{}", path.display()))
    })?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(FaviconError::Decode(format!(
            "文件签名不是图片类型（{}）：{}",
            path.display(),
            kind.mime_type()
        )));
    }

    Ok(())
}

/// 仅通过图片头信息读取宽高，用于在完整解码前做像素限制检查。
fn inspect_dimensions(path: &Path, bytes: &[u8]) -> Result<(u32, u32), FaviconError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| {
            FaviconError::Decode(format!("无法识别源图格式（{}）：{}", path.display(), e))
        })?;

    reader.into_dimensions().map_err(|e| {
        FaviconError::Decode(format!("无法读取源图尺寸（{}）：{}", path.display(), e))
    })
}

fn validate_pixel_limits(
    config: &FaviconConfig,
    width: u32,
    height: u32,
) -> Result<(), FaviconError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| FaviconError::ResourceLimit("源图像素数溢出".to_string()))?;

    if pixels > config.max_source_pixels {
        return Err(FaviconError::ResourceLimit(format!(
            "源图像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_source_pixels
        )));
    }

    Ok(())
}
