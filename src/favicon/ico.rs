//! # ICO 容器打包模块
//!
//! ## 设计思路
//!
//! 直接按“文件头 → 目录项 → 帧数据”的二进制布局拼装容器，帧数据使用 PNG，
//! 完全绕开 BMP-in-ICO 编码。整个容器先在内存中构建完成，调用方再一次性写盘。
//!
//! ## 布局
//!
//! ```text
//! 0        2        4        6
//! ┌────────┬────────┬────────┐
//! │ 0      │ 1      │ count  │  文件头（小端）
//! └────────┴────────┴────────┘
//! ┌──┬──┬──┬──┬─────┬─────┬──────────┬──────────┐
//! │w │h │0 │0 │  1  │ 32  │  bytes   │  offset  │  目录项 × count（16 字节）
//! └──┴──┴──┴──┴─────┴─────┴──────────┴──────────┘
//! frame 0 | frame 1 | ...                           帧数据按目录顺序紧密相接
//! ```
//!
//! 宽高字段为 1 字节，0 表示 256。

use super::config::ICO_MAX_DIMENSION;
use super::{FaviconError, MaskedIcon};

pub const ICO_HEADER_LEN: usize = 6;
pub const ICO_DIR_ENTRY_LEN: usize = 16;

const ICO_TYPE_ICON: u16 = 1;
const ICO_COLOR_PLANES: u16 = 1;
const ICO_BITS_PER_PIXEL: u16 = 32;

/// 一帧待打包的数据：像素尺寸 + 已编码字节。
#[derive(Debug, Clone, Copy)]
pub struct IcoFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl<'a> IcoFrame<'a> {
    pub fn new(icon: &MaskedIcon, encoded: &'a [u8]) -> Self {
        Self {
            width: icon.size(),
            height: icon.size(),
            data: encoded,
        }
    }
}

/// 从容器中读回的目录项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoDirEntry {
    pub width: u32,
    pub height: u32,
    pub color_count: u8,
    pub planes: u16,
    pub bit_count: u16,
    pub bytes_in_res: u32,
    pub image_offset: u32,
}

impl IcoDirEntry {
    /// 该帧在容器中的字节范围。
    pub fn data_range(&self) -> std::ops::Range<usize> {
        let start = self.image_offset as usize;
        start..start + self.bytes_in_res as usize
    }
}

/// 将有序帧集合打包为 ICO 字节。
pub fn pack(frames: &[IcoFrame<'_>]) -> Result<Vec<u8>, FaviconError> {
    if frames.is_empty() {
        return Err(FaviconError::EmptyFrameSet);
    }

    let count = u16::try_from(frames.len()).map_err(|_| {
        FaviconError::ResourceLimit(format!("ICO 帧数过多：{}（上限 {}）", frames.len(), u16::MAX))
    })?;

    let directory_len = ICO_HEADER_LEN + ICO_DIR_ENTRY_LEN * frames.len();
    let data_len: usize = frames.iter().map(|f| f.data.len()).sum();
    let mut out = Vec::with_capacity(directory_len + data_len);

    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&ICO_TYPE_ICON.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());

    let mut offset = directory_len;
    for (index, frame) in frames.iter().enumerate() {
        let width = dimension_byte(frame.width)?;
        let height = dimension_byte(frame.height)?;
        let len = u32_field(frame.data.len(), index, frame.data.len())?;
        let image_offset = u32_field(offset, index, frame.data.len())?;

        out.push(width);
        out.push(height);
        out.push(0);
        out.push(0);
        out.extend_from_slice(&ICO_COLOR_PLANES.to_le_bytes());
        out.extend_from_slice(&ICO_BITS_PER_PIXEL.to_le_bytes());
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&image_offset.to_le_bytes());

        offset += frame.data.len();
    }

    for frame in frames {
        out.extend_from_slice(frame.data);
    }

    log::debug!("📦 ICO 打包完成 - 帧数: {} 总字节: {}", count, out.len());
    Ok(out)
}

/// 目录项中的 4 字节字段（帧长度、偏移），超出范围时报告对应帧。
fn u32_field(value: usize, index: usize, frame_len: usize) -> Result<u32, FaviconError> {
    u32::try_from(value).map_err(|_| FaviconError::FrameTooLarge {
        index,
        len: frame_len,
    })
}

fn dimension_byte(value: u32) -> Result<u8, FaviconError> {
    match value {
        0 => Err(FaviconError::InvalidSize {
            size: value,
            reason: "ICO 帧边长必须大于 0".to_string(),
        }),
        ICO_MAX_DIMENSION => Ok(0),
        v if v < ICO_MAX_DIMENSION => Ok(v as u8),
        v => Err(FaviconError::InvalidSize {
            size: v,
            reason: format!("ICO 帧边长不能超过 {}", ICO_MAX_DIMENSION),
        }),
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// 读回 ICO 文件头与目录，并校验每一帧的数据范围都落在容器内。
pub fn parse_directory(bytes: &[u8]) -> Result<Vec<IcoDirEntry>, FaviconError> {
    if bytes.len() < ICO_HEADER_LEN {
        return Err(FaviconError::Decode("ICO 文件头不完整".to_string()));
    }
    if read_u16(bytes, 0) != 0 || read_u16(bytes, 2) != ICO_TYPE_ICON {
        return Err(FaviconError::Decode("ICO 文件头标识无效".to_string()));
    }

    let count = read_u16(bytes, 4) as usize;
    let directory_end = ICO_HEADER_LEN + ICO_DIR_ENTRY_LEN * count;
    if bytes.len() < directory_end {
        return Err(FaviconError::Decode(format!("ICO 目录不完整：声明 {} 帧", count)));
    }

    let mut entries = Vec::with_capacity(count);
    for index in 0..count {
        let at = ICO_HEADER_LEN + ICO_DIR_ENTRY_LEN * index;
        let raw_width = bytes[at] as u32;
        let raw_height = bytes[at + 1] as u32;
        let entry = IcoDirEntry {
            width: if raw_width == 0 { ICO_MAX_DIMENSION } else { raw_width },
            height: if raw_height == 0 { ICO_MAX_DIMENSION } else { raw_height },
            color_count: bytes[at + 2],
            planes: read_u16(bytes, at + 4),
            bit_count: read_u16(bytes, at + 6),
            bytes_in_res: read_u32(bytes, at + 8),
            image_offset: read_u32(bytes, at + 12),
        };

        let range = entry.data_range();
        if range.start < directory_end || range.end > bytes.len() {
            return Err(FaviconError::Decode(format!(
                "ICO 第 {} 帧数据越界：{:?}（文件长度 {}）",
                index,
                range,
                bytes.len()
            )));
        }
        entries.push(entry);
    }

    Ok(entries)
}
