//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `FaviconGenerator` 只负责流程编排，处理链路固定为：
//! 1. 校验配置
//! 2. 加载源图（缺失时立即失败，不触碰输出目录）
//! 3. 按目标逐个光栅化 + PNG 编码（可并行，结果保持配置顺序）
//! 4. 收集 ICO 帧并打包（汇合点：所有帧就绪后才执行）
//! 5. 整组输出一次性落盘
//!
//! ## 实现思路
//!
//! - `render` 为纯内存操作，不访问文件系统，便于测试。
//! - 记录 `load/render/pack/write/total` 阶段耗时，便于诊断。

use rayon::prelude::*;
use std::time::Instant;

use super::config::ICO_FILE_NAME;
use super::encoder::encode_png;
use super::ico::{self, IcoFrame};
use super::loader::load_source;
use super::rasterizer::rasterize;
use super::writer::write_output_set;
use super::{FaviconConfig, FaviconError, FaviconSet, IconTarget, MaskedIcon, OutputFile, SourceImage};

/// 单个目标的中间结果。
struct RenderedTarget {
    icon: MaskedIcon,
    png: Vec<u8>,
}

/// 图标生成器。
pub struct FaviconGenerator {
    config: FaviconConfig,
}

impl FaviconGenerator {
    /// 创建生成器，配置无效时直接失败。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use favicon_forge::favicon::{FaviconConfig, FaviconGenerator};
    ///
    /// let generator = FaviconGenerator::new(FaviconConfig::default())?;
    /// generator.run()?;
    /// # Ok::<(), favicon_forge::favicon::FaviconError>(())
    /// ```
    pub fn new(config: FaviconConfig) -> Result<Self, FaviconError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 完整流程：加载 → 渲染 → 落盘。
    pub fn run(&self) -> Result<FaviconSet, FaviconError> {
        let total_start = Instant::now();

        let set = self.generate()?;

        let write_start = Instant::now();
        write_output_set(&self.config.output_dir, &set)?;
        let write_ms = write_start.elapsed().as_millis();

        log::info!(
            "✅ 圆形图标生成完成，输出目录：{}（{} 个文件，write={}ms total={}ms）",
            self.config.output_dir.display(),
            set.len(),
            write_ms,
            total_start.elapsed().as_millis()
        );

        Ok(set)
    }

    /// 加载源图并在内存中生成完整输出集合，不写盘。
    pub fn generate(&self) -> Result<FaviconSet, FaviconError> {
        let load_start = Instant::now();
        let source = load_source(&self.config)?;
        log::info!("⏱️ 源图加载耗时：{}ms", load_start.elapsed().as_millis());

        self.render(&source)
    }

    /// 纯内存渲染：各目标 PNG + `favicon.ico`。
    pub fn render(&self, source: &SourceImage) -> Result<FaviconSet, FaviconError> {
        let render_start = Instant::now();
        let rendered = self.render_targets(source)?;
        let render_ms = render_start.elapsed().as_millis();

        let pack_start = Instant::now();
        let frames: Vec<IcoFrame<'_>> = self
            .config
            .targets
            .iter()
            .zip(&rendered)
            .filter(|(target, _)| target.include_in_ico)
            .map(|(_, r)| IcoFrame::new(&r.icon, &r.png))
            .collect();
        let ico_bytes = if frames.is_empty() {
            None
        } else {
            Some(ico::pack(&frames)?)
        };
        let pack_ms = pack_start.elapsed().as_millis();

        log::info!(
            "⏱️ 渲染耗时：render={}ms pack={}ms（目标 {} 个，ICO 帧 {} 个）",
            render_ms,
            pack_ms,
            rendered.len(),
            frames.len()
        );

        let mut files: Vec<OutputFile> = self
            .config
            .targets
            .iter()
            .zip(rendered)
            .map(|(target, r)| OutputFile {
                file_name: target.file_name.clone(),
                bytes: r.png,
            })
            .collect();

        if let Some(bytes) = ico_bytes {
            files.push(OutputFile {
                file_name: ICO_FILE_NAME.to_string(),
                bytes,
            });
        }

        Ok(FaviconSet { files })
    }

    fn render_targets(&self, source: &SourceImage) -> Result<Vec<RenderedTarget>, FaviconError> {
        let filter = self.config.resize_filter;
        let render_one = |target: &IconTarget| -> Result<RenderedTarget, FaviconError> {
            let icon = rasterize(source, target.size, filter)?;
            let png = encode_png(&icon)?;
            log::debug!(
                "🖼️ 目标完成 - {} ({}x{}, {} 字节)",
                target.file_name,
                target.size,
                target.size,
                png.len()
            );
            Ok(RenderedTarget { icon, png })
        };

        if self.config.parallel {
            self.config.targets.par_iter().map(render_one).collect()
        } else {
            self.config.targets.iter().map(render_one).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favicon::ico::parse_directory;
    use image::{Rgba, RgbaImage};

    fn source() -> SourceImage {
        SourceImage::from_rgba(
            "memory.png",
            RgbaImage::from_fn(80, 50, |x, y| Rgba([x as u8, y as u8, 128, 255])),
        )
    }

    #[test]
    fn render_produces_default_file_set_in_order() {
        let generator = FaviconGenerator::new(FaviconConfig::default()).unwrap();

        let set = generator.render(&source()).expect("render failed");

        let names: Vec<&str> = set.file_names().collect();
        assert_eq!(
            names,
            vec!["icon-16.png", "icon-32.png", "icon-48.png", "apple-touch-icon.png", "favicon.ico"]
        );

        let ico_bytes = set.get("favicon.ico").unwrap();
        let entries = parse_directory(ico_bytes).unwrap();
        let png_16 = set.get("icon-16.png").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(&ico_bytes[entries[0].data_range()], png_16);
    }

    #[test]
    fn parallel_and_sequential_renders_match() {
        let parallel = FaviconGenerator::new(FaviconConfig::default()).unwrap();
        let mut config = FaviconConfig::default();
        config.parallel = false;
        let sequential = FaviconGenerator::new(config).unwrap();

        assert_eq!(
            parallel.render(&source()).unwrap(),
            sequential.render(&source()).unwrap()
        );
    }

    #[test]
    fn render_skips_container_without_ico_targets() {
        let mut config = FaviconConfig::default();
        config.targets = vec![IconTarget::new(64, "icon-64.png", false)];
        let generator = FaviconGenerator::new(config).unwrap();

        let set = generator.render(&source()).unwrap();

        assert_eq!(set.file_names().collect::<Vec<_>>(), vec!["icon-64.png"]);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = FaviconConfig::default();
        config.targets.clear();

        assert!(FaviconGenerator::new(config).is_err());
    }
}
