//! 输出目录清理 - 业务能力层
//!
//! 清空 Jekyll 的 _posts 和 _notes 目录，但不删除目录本身。

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 清理结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// 已删除的条目数
    pub removed: usize,
    /// 删除失败的条目
    pub failed: Vec<PathBuf>,
}

/// 清空所有输出目录
///
/// 目录存在则删除其中所有条目（文件、符号链接、子目录），不存在则创建。
/// 单个条目删除失败只记录日志，不影响其余条目。
pub fn clean_output_directories<P: AsRef<Path>>(dirs: &[P]) -> AppResult<CleanReport> {
    let mut report = CleanReport::default();
    for dir in dirs {
        let dir = dir.as_ref();
        if dir.exists() {
            empty_directory(dir, &mut report);
        } else {
            fs::create_dir_all(dir).map_err(|e| AppError::create_dir_failed(dir, e))?;
            debug!("创建输出目录: {}", dir.display());
        }
    }
    Ok(report)
}

fn empty_directory(dir: &Path, report: &mut CleanReport) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list {}. Reason: {}", dir.display(), e);
            report.failed.push(dir.to_path_buf());
            return;
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("Failed to read entry in {}. Reason: {}", dir.display(), e);
                continue;
            }
        };
        match remove_entry(&path) {
            Ok(()) => report.removed += 1,
            Err(e) => {
                warn!("Failed to delete {}. Reason: {}", path.display(), e);
                report.failed.push(path);
            }
        }
    }
}

/// 文件和符号链接直接删除，目录递归删除
fn remove_entry(path: &Path) -> std::io::Result<()> {
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
