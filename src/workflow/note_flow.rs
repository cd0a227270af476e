//! 单篇笔记处理流程 - 流程层
//!
//! 核心职责：定义"一篇笔记"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取并解析 front matter
//! 2. 发布过滤（publish / status）
//! 3. 按 type 分类到 _notes 或 _posts
//! 4. 图片嵌入 → 复制图片；内部链接 → markdown 链接
//! 5. 生成文件名，重建 front matter，写入输出文件

use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, SkipReason};
use crate::models::{Note, NoteKind};
use crate::services::naming::{date_from_front_matter, date_from_mtime, output_filename, slugify};
use crate::services::{ImageService, LinkRewriter};

/// 默认布局
pub const DEFAULT_LAYOUT: &str = "post";

/// 已发布笔记的信息
#[derive(Debug, Clone)]
pub struct PublishedNote {
    /// 源文件
    pub source: PathBuf,
    /// 输出文件
    pub output_path: PathBuf,
    /// 输出文件名
    pub filename: String,
    /// 输出容器
    pub kind: NoteKind,
    /// 已复制的图片
    pub copied_images: Vec<PathBuf>,
    /// 未找到的图片嵌入
    pub missing_images: Vec<String>,
}

/// 笔记处理结果
#[derive(Debug)]
pub enum NoteOutcome {
    /// 已写入输出文件
    Published(PublishedNote),
    /// 跳过（结构问题或未通过发布过滤）
    Skipped(SkipReason),
}

/// 笔记处理流程
///
/// - 只处理单篇笔记，不关心遍历顺序
/// - 预期内的问题返回 `Skipped`，只有写文件等环境错误返回 `Err`
pub struct NoteFlow {
    link_rewriter: LinkRewriter,
    image_service: ImageService,
    posts_path: PathBuf,
    notes_path: PathBuf,
}

impl NoteFlow {
    /// 创建新的笔记处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            link_rewriter: LinkRewriter::new(config.note_link_prefix.as_str()),
            image_service: ImageService::new(
                &config.vault_path,
                &config.images_path,
                config.image_url_prefix.as_str(),
            ),
            posts_path: config.posts_path.clone(),
            notes_path: config.notes_path.clone(),
        }
    }

    /// 处理单个笔记文件
    pub fn process(&self, filepath: &Path) -> AppResult<NoteOutcome> {
        let note = match load_note(filepath) {
            Ok(note) => note,
            Err(reason) => return Ok(skip(filepath, reason)),
        };

        if !note.is_publishable() {
            return Ok(skip(filepath, SkipReason::NotPublishable));
        }

        let note_type = note.note_type();
        let kind = note.kind();
        let target_dir = match kind {
            NoteKind::Note => &self.notes_path,
            NoteKind::Post => &self.posts_path,
        };
        info!("Processing {} as {} for publishing...", filepath.display(), note_type);

        // 先处理图片嵌入，避免 `![[...]]` 被当作普通链接改写
        let images = self.image_service.rewrite(&note.body, note.dir())?;
        let body = self.link_rewriter.rewrite(&images.body);

        let title = note.title();
        let date = date_from_front_matter(note.get_present("date"))
            .unwrap_or_else(|| date_from_mtime(modified_time(filepath)));
        let slug = slugify(&title);
        if slug.is_empty() {
            warn!("标题 '{}' 生成的 slug 为空: {}", title, filepath.display());
        }
        let filename = output_filename(&date, &slug);
        let output_path = target_dir.join(&filename);

        let content = render_output(note, &title, &date, &body)?;
        fs::create_dir_all(target_dir).map_err(|e| AppError::create_dir_failed(target_dir, e))?;
        fs::write(&output_path, content).map_err(|e| AppError::write_failed(&output_path, e))?;

        info!("Generated filename: {}", filename);
        info!(
            "Successfully published {} to {}",
            filepath.display(),
            output_path.display()
        );

        Ok(NoteOutcome::Published(PublishedNote {
            source: filepath.to_path_buf(),
            output_path,
            filename,
            kind,
            copied_images: images.copied,
            missing_images: images.missing,
        }))
    }
}

fn load_note(filepath: &Path) -> Result<Note, SkipReason> {
    let content = fs::read_to_string(filepath).map_err(SkipReason::Unreadable)?;
    Note::parse(filepath, &content)
}

fn skip(filepath: &Path, reason: SkipReason) -> NoteOutcome {
    if reason.is_filter() {
        info!("Skipping {}: {}", filepath.display(), reason);
    } else {
        warn!("Skipping {}: {}", filepath.display(), reason);
    }
    NoteOutcome::Skipped(reason)
}

fn modified_time(filepath: &Path) -> SystemTime {
    fs::metadata(filepath)
        .and_then(|m| m.modified())
        .unwrap_or_else(|e| {
            warn!("无法读取修改时间 {}: {}，使用当前时间", filepath.display(), e);
            SystemTime::now()
        })
}

/// 重建 front matter 并拼接正文
///
/// 已有的键保持原位置；新增键按 layout、title、date 的顺序追加。
fn render_output(note: Note, title: &str, date: &str, body: &str) -> AppResult<String> {
    let mut front_matter = note.front_matter;
    let layout = front_matter
        .get("layout")
        .cloned()
        .unwrap_or_else(|| Value::String(DEFAULT_LAYOUT.to_string()));
    front_matter.insert(Value::from("layout"), layout);
    front_matter.insert(Value::from("title"), Value::from(title));
    front_matter.insert(Value::from("date"), Value::from(date));

    let yaml = serde_yaml::to_string(&front_matter)?;
    Ok(format!("---\n{}---\n{}", yaml, body))
}
