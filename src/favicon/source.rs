//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“流水线中间结果”解耦：
//! - `SourceImage` 表示已解码、整次运行只读的源图
//! - `MaskedIcon` 表示某一尺寸下已完成圆形遮罩的 RGBA 图标
//! - `OutputFile` / `FaviconSet` 表示待落盘的完整输出集合

use image::RgbaImage;
use std::path::{Path, PathBuf};

/// 已解码的源图（RGBA8）。
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub(crate) path: PathBuf,
    pub(crate) pixels: RgbaImage,
}

impl SourceImage {
    /// 直接由内存像素构建，便于在无文件系统的场景下测试核心流程。
    pub fn from_rgba(path: impl Into<PathBuf>, pixels: RgbaImage) -> Self {
        Self {
            path: path.into(),
            pixels,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// 某一尺寸的圆形透明图标。
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedIcon {
    pub(crate) size: u32,
    pub(crate) pixels: RgbaImage,
}

impl MaskedIcon {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// 单个待写入文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 一次运行的完整输出集合，全部在内存中构建完成后才落盘。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaviconSet {
    pub files: Vec<OutputFile>,
}

impl FaviconSet {
    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| f.bytes.as_slice())
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.file_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
