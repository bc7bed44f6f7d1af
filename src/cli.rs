//! 命令行参数模块
//!
//! 用法：`favicon-forge [SOURCE] [OUT_DIR]`，两个位置参数均可省略，
//! 省略时使用 `FaviconConfig::default()` 中的路径。

use clap::Parser;
use std::path::PathBuf;

use crate::favicon::FaviconConfig;

#[derive(Debug, Parser)]
#[command(name = "favicon-forge")]
#[command(version, about = "生成圆形 favicon PNG 与多帧 favicon.ico", long_about = None)]
pub struct Cli {
    /// 源图路径（默认 src/images/logo.jpg）
    pub source: Option<PathBuf>,

    /// 输出目录（默认 public/favicons）
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    /// 将位置参数合并进默认配置。
    pub fn into_config(self) -> FaviconConfig {
        let mut config = FaviconConfig::default();
        if let Some(source) = self.source {
            config = config.with_source(source);
        }
        if let Some(out_dir) = self.out_dir {
            config = config.with_output_dir(out_dir);
        }
        config
    }
}
