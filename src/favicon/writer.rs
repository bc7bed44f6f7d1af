//! # 输出落盘模块
//!
//! ## 设计思路
//!
//! 输出集合在内存中已完整构建，落盘阶段只需保证“要么全部替换，要么保持原样”。
//!
//! ## 实现思路
//!
//! - 输出目录不存在时自动 `create_dir_all`。
//! - 先把每个文件写成同目录下的隐藏临时文件（`.{name}.tmp`），全部成功后再逐个 `rename`。
//! - 任一临时文件写入失败时清理已写出的临时文件，不留下半套输出。

use std::fs;
use std::path::{Path, PathBuf};

use super::{FaviconError, FaviconSet};

fn staging_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!(".{}.tmp", file_name))
}

fn remove_staged(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(err) = fs::remove_file(tmp) {
            log::warn!("清理临时文件失败 {}: {}", tmp.display(), err);
        }
    }
}

/// 将完整输出集合写入目录。
pub fn write_output_set(dir: &Path, set: &FaviconSet) -> Result<(), FaviconError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| FaviconError::io(dir, e))?;
        log::info!("📂 已创建输出目录：{}", dir.display());
    }

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(set.len());
    for file in &set.files {
        let tmp = staging_path(dir, &file.file_name);
        if let Err(err) = fs::write(&tmp, &file.bytes) {
            // 写失败的临时文件可能已部分生成
            let _ = fs::remove_file(&tmp);
            remove_staged(&staged);
            return Err(FaviconError::io(tmp, err));
        }
        staged.push((tmp, dir.join(&file.file_name)));
    }

    for (index, (tmp, target)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(tmp, target) {
            remove_staged(&staged[index..]);
            return Err(FaviconError::io(target, err));
        }
        log::debug!("💾 已写入 {}", target.display());
    }

    Ok(())
}
