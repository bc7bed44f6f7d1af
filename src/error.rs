//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError` 枚举，命令行入口统一返回 `Result<T, AppError>`，
//! 失败时打印一条带失败阶段的诊断信息并以非零码退出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `FaviconError` 提供 `From` 转换，无需手动 map。

use crate::favicon::FaviconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标生成流水线错误（加载 / 光栅化 / 编码 / 打包 / 写盘）
    #[error("{0}")]
    Favicon(#[from] FaviconError),
}

impl AppError {
    /// 失败阶段名称。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Favicon(err) => err.stage(),
        }
    }
}
