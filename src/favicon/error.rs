//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图标生成链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 每个错误都带有足够的上下文（源图路径、目标尺寸、输出文件），
//! 并可通过 [`FaviconError::stage`] 得知失败阶段，便于命令行给出单条诊断信息。

use std::path::PathBuf;

/// 图标生成统一错误类型。
///
/// 所有错误对整次运行都是致命的：不存在“部分成功”模式，也不做自动重试。
#[derive(Debug, thiserror::Error)]
pub enum FaviconError {
    #[error("源图未找到：{}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("源图读取失败（{}）：{}", path.display(), source)]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无效尺寸 {size}：{reason}")]
    InvalidSize { size: u32, reason: String },

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("PNG 编码失败（尺寸 {size}）：{message}")]
    Encode { size: u32, message: String },

    #[error("ICO 帧集合为空")]
    EmptyFrameSet,

    #[error("ICO 第 {index} 帧过大：{len} 字节无法写入 4 字节字段")]
    FrameTooLarge { index: usize, len: usize },

    #[error("文件错误（{}）：{}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),
}

impl FaviconError {
    /// 失败阶段名称，用于命令行诊断输出。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. }
            | Self::SourceRead { .. }
            | Self::Decode(_)
            | Self::ResourceLimit(_) => "load",
            Self::InvalidSize { .. } => "rasterize",
            Self::Encode { .. } => "encode",
            Self::EmptyFrameSet | Self::FrameTooLarge { .. } => "pack",
            Self::Io { .. } => "write",
            Self::InvalidConfig(_) => "config",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
