//! # 圆形图标生成模块（favicon）
//!
//! ## 设计思路
//!
//! 该模块将“源图加载 → cover 缩放 → 圆形遮罩 → PNG 编码 → ICO 打包 → 落盘”
//! 按职责拆分为多个子模块。核心（光栅化、编码、打包）全部是内存中的纯函数，
//! 文件系统副作用只出现在 `loader` 与 `writer` 两端。
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs（命令行参数 → FaviconConfig）
//!    ↓
//! generator.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（存在性 / 体积 / 签名 / 像素上限 + 解码）
//!    ├─ rasterizer.rs（cover 缩放）
//!    │    └─ mask.rs（圆形遮罩 + destination-in）
//!    ├─ encoder.rs（PNG 编码）
//!    ├─ ico.rs（ICO 容器二进制布局）
//!    └─ writer.rs（临时文件 + rename 落盘）
//!    ↓
//! 返回 FaviconError（带失败阶段）
//! ```
//!
//! ## 分层职责建议
//!
//! - 输出尺寸/文件名变更优先改 `config.rs`
//! - 流程顺序变更优先改 `generator.rs`
//! - 单阶段行为分别改 `loader/rasterizer/mask/encoder/ico/writer`

mod config;
mod encoder;
mod error;
mod generator;
pub mod ico;
mod loader;
pub mod mask;
mod rasterizer;
mod source;
mod writer;

pub use config::{FaviconConfig, IconTarget, ICO_FILE_NAME, ICO_MAX_DIMENSION};
pub use encoder::{decode_png, encode_png};
pub use error::FaviconError;
pub use generator::FaviconGenerator;
pub use ico::{pack, parse_directory, IcoDirEntry, IcoFrame};
pub use loader::{decode_source, load_source};
pub use rasterizer::{cover_crop_box, rasterize, resize_cover, CropBox};
pub use source::{FaviconSet, MaskedIcon, OutputFile, SourceImage};
pub use writer::write_output_set;
