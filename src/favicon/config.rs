//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `FaviconConfig`，保证一次运行的行为可观测、可测试。
//! 目标尺寸与输出文件名绑定在 `IconTarget` 中，ICO 帧顺序即目标列表顺序。
//!
//! ## 实现思路
//!
//! - `Default` 提供与前端 `public/favicons` 约定一致的生产配置。
//! - `validate` 在任何 I/O 之前执行，尽早拒绝无效配置。

use image::imageops::FilterType;
use std::collections::HashSet;
use std::path::PathBuf;

use super::FaviconError;

/// ICO 目录项中宽高字段为 1 字节，0 表示 256。
pub const ICO_MAX_DIMENSION: u32 = 256;

/// ICO 容器文件名。
pub const ICO_FILE_NAME: &str = "favicon.ico";

/// 单个输出目标：尺寸 + 文件名 + 是否收录进 ICO。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTarget {
    /// 输出边长（像素），宽高相同。
    pub size: u32,
    /// 输出目录下的 PNG 文件名。
    pub file_name: String,
    /// 是否作为一帧写入 `favicon.ico`。
    pub include_in_ico: bool,
}

impl IconTarget {
    pub fn new(size: u32, file_name: impl Into<String>, include_in_ico: bool) -> Self {
        Self {
            size,
            file_name: file_name.into(),
            include_in_ico,
        }
    }
}

/// 图标生成配置。
#[derive(Debug, Clone)]
pub struct FaviconConfig {
    /// 源图路径。
    pub source_path: PathBuf,
    /// 输出目录（不存在时自动创建）。
    pub output_dir: PathBuf,
    /// 有序目标列表。
    pub targets: Vec<IconTarget>,
    /// 缩放滤镜策略。
    pub resize_filter: FilterType,
    /// 源图文件体积上限（字节）。
    pub max_source_file_size: u64,
    /// 源图解码后的像素上限（`width * height`）。
    pub max_source_pixels: u64,
    /// 是否并行处理各目标尺寸。
    pub parallel: bool,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("src/images/logo.jpg"),
            output_dir: PathBuf::from("public/favicons"),
            targets: vec![
                IconTarget::new(16, "icon-16.png", true),
                IconTarget::new(32, "icon-32.png", true),
                IconTarget::new(48, "icon-48.png", true),
                IconTarget::new(180, "apple-touch-icon.png", false),
            ],
            resize_filter: FilterType::Triangle,
            max_source_file_size: 50 * 1024 * 1024,
            max_source_pixels: 40_000_000,
            parallel: true,
        }
    }
}

impl FaviconConfig {
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// 收录进 ICO 的目标（保持配置顺序）。
    pub fn ico_targets(&self) -> impl Iterator<Item = &IconTarget> {
        self.targets.iter().filter(|t| t.include_in_ico)
    }

    /// 在任何文件读写前校验配置。
    pub fn validate(&self) -> Result<(), FaviconError> {
        if self.targets.is_empty() {
            return Err(FaviconError::InvalidConfig("目标尺寸列表为空".to_string()));
        }

        let mut names = HashSet::new();
        for target in &self.targets {
            if target.size == 0 {
                return Err(FaviconError::InvalidSize {
                    size: target.size,
                    reason: format!("目标 {} 的尺寸必须大于 0", target.file_name),
                });
            }

            if target.include_in_ico && target.size > ICO_MAX_DIMENSION {
                return Err(FaviconError::InvalidSize {
                    size: target.size,
                    reason: format!("ICO 帧边长不能超过 {}", ICO_MAX_DIMENSION),
                });
            }

            if target.file_name.is_empty() || target.file_name == ICO_FILE_NAME {
                return Err(FaviconError::InvalidConfig(format!(
                    "目标文件名无效：{:?}",
                    target.file_name
                )));
            }

            if !names.insert(target.file_name.as_str()) {
                return Err(FaviconError::InvalidConfig(format!(
                    "目标文件名重复：{}",
                    target.file_name
                )));
            }
        }

        Ok(())
    }
}
