//! # 圆形 favicon 生成工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::process::ExitCode;

use clap::Parser;
use favicon_forge::cli::Cli;
use favicon_forge::error::AppError;
use favicon_forge::favicon::FaviconGenerator;

fn run(cli: Cli) -> Result<(), AppError> {
    let config = cli.into_config();
    log::info!(
        "start: source={} out={}",
        config.source_path.display(),
        config.output_dir.display()
    );

    let generator = FaviconGenerator::new(config)?;
    generator.run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 参数错误与 --help 由 clap 自行输出并退出
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ 图标生成失败 [{}]: {}", err.stage(), err);
            ExitCode::FAILURE
        }
    }
}
