//! # 圆形 favicon 生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            前端构建 (Vue + Vite, public/favicons)         │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ 一次性离线调用（退出码 0 / 非 0）
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ cli ──────── 参数解析 → FaviconConfig                │
//! │  │                                                       │
//! │  ├─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  └─ favicon ──── 加载·缩放·遮罩·编码·打包·落盘            │
//! │      ├─ rasterizer  cover 缩放 + 圆形遮罩                 │
//! │      └─ ico         多帧 ICO 容器                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，命令行入口的返回类型 |
//! | [`cli`] | 位置参数解析，生成运行配置 |
//! | [`favicon`] | 圆形图标光栅化、PNG 编码、ICO 打包与输出落盘 |

pub mod cli;
pub mod error;
pub mod favicon;
