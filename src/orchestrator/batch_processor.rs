//! 批量笔记处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整的"清空 → 遍历 → 逐篇处理"。
//!
//! ## 核心功能
//!
//! 1. **清空输出目录**：每次运行只调用一次
//! 2. **遍历笔记库**：递归查找所有 `.md` 文件，按文件系统遍历顺序
//! 3. **逐篇处理**：委托 `NoteFlow` 处理单篇笔记，串行执行
//! 4. **全局统计**：汇总发布、跳过、图片数量
//!
//! 单篇笔记的预期问题只会被跳过；写文件失败等环境错误会中止整个运行。

use crate::config::Config;
use crate::models::NoteKind;
use crate::services::clean_output_directories;
use crate::utils::logging::{log_final_stats, log_startup};
use crate::workflow::{NoteFlow, NoteOutcome};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 笔记文件后缀
const MARKDOWN_SUFFIX: &str = ".md";

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    /// 找到的 `.md` 文件数
    pub total: usize,
    /// 发布到 _notes 的数量
    pub notes: usize,
    /// 发布到 _posts 的数量
    pub posts: usize,
    /// 跳过的数量
    pub skipped: usize,
    /// 复制的图片数
    pub images_copied: usize,
    /// 未找到的图片嵌入数
    pub images_missing: usize,
    /// 清理输出目录时删除失败的条目数
    pub clean_failures: usize,
}

impl ProcessingStats {
    /// 已发布总数
    pub fn published(&self) -> usize {
        self.notes + self.posts
    }

    fn record(&mut self, outcome: &NoteOutcome) {
        match outcome {
            NoteOutcome::Published(note) => {
                match note.kind {
                    NoteKind::Note => self.notes += 1,
                    NoteKind::Post => self.posts += 1,
                }
                self.images_copied += note.copied_images.len();
                self.images_missing += note.missing_images.len();
            }
            NoteOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: NoteFlow,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);
        let flow = NoteFlow::new(&config);
        Self { config, flow }
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<ProcessingStats> {
        let mut stats = ProcessingStats::default();

        let report = clean_output_directories(&[&self.config.posts_path, &self.config.notes_path])
            .context("无法准备输出目录")?;
        stats.clean_failures = report.failed.len();
        debug!("已清理 {} 个旧条目", report.removed);

        let vault = &self.config.vault_path;
        if !vault.is_dir() {
            warn!("⚠️ 笔记库目录不存在: {}，没有可处理的笔记", vault.display());
            log_final_stats(&stats);
            return Ok(stats);
        }

        for filepath in markdown_files(vault) {
            stats.total += 1;
            let outcome = self
                .flow
                .process(&filepath)
                .with_context(|| format!("处理笔记失败: {}", filepath.display()))?;
            stats.record(&outcome);
        }

        log_final_stats(&stats);
        Ok(stats)
    }
}

/// 递归列出笔记库中所有以 `.md` 结尾的文件（不跟随目录符号链接）
fn markdown_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("遍历笔记库时出错: {}", e);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(MARKDOWN_SUFFIX))
        .map(|entry| entry.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_files_recurses_and_filters() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.md"), "").unwrap();
        fs::write(root.join("a/b/deep.md"), "").unwrap();
        fs::write(root.join("a/image.png"), "").unwrap();
        fs::write(root.join("a/readme.MD"), "").unwrap();
        fs::create_dir_all(root.join("folder.md")).unwrap();

        let mut found: Vec<_> = markdown_files(root)
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        found.sort();

        assert_eq!(
            found,
            vec![PathBuf::from("a/b/deep.md"), PathBuf::from("top.md")]
        );
    }

    #[test]
    fn test_stats_record() {
        let mut stats = ProcessingStats::default();
        stats.record(&NoteOutcome::Skipped(crate::error::SkipReason::NotPublishable));
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.published(), 0);
    }
}
