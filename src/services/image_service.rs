//! 图片嵌入处理 - 业务能力层
//!
//! `![[image.jpg]]` -> `![](/assets/images/image.jpg)`，同时把图片复制到输出目录。

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

fn embed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[\[(.*?)\]\]").expect("image embed regex"))
}

/// 单篇笔记的图片处理结果
#[derive(Debug, Default)]
pub struct ImageRewrite {
    /// 改写后的正文
    pub body: String,
    /// 已复制到输出目录的图片
    pub copied: Vec<PathBuf>,
    /// 没找到源文件的嵌入名（每个嵌入一条，可重复）
    pub missing: Vec<String>,
}

/// 图片处理服务
///
/// 查找顺序：笔记所在目录 → 笔记库根目录。
/// 所有笔记共用一个图片输出目录，同名图片直接覆盖。
pub struct ImageService {
    vault_root: PathBuf,
    images_dir: PathBuf,
    url_prefix: String,
}

impl ImageService {
    pub fn new(
        vault_root: impl Into<PathBuf>,
        images_dir: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            vault_root: vault_root.into(),
            images_dir: images_dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// 改写正文中的所有图片嵌入
    ///
    /// 找不到的图片保留原始 `![[...]]` 写法并记一条警告；复制失败直接返回错误。
    pub fn rewrite(&self, body: &str, note_dir: &Path) -> AppResult<ImageRewrite> {
        let mut result = ImageRewrite::default();
        let mut out = String::with_capacity(body.len());
        let mut last = 0;

        for caps in embed_re().captures_iter(body) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let image_name = caps.get(1).map_or("", |m| m.as_str());
            out.push_str(&body[last..whole.start]);
            last = whole.end;

            match self.locate(image_name, note_dir) {
                Some(source) => {
                    let dest = self.copy_image(&source, image_name)?;
                    out.push_str(&format!("![]({}/{})", self.url_prefix, image_name));
                    result.copied.push(dest);
                }
                None => {
                    out.push_str(&body[whole]);
                    result.missing.push(image_name.to_string());
                }
            }
        }

        out.push_str(&body[last..]);
        result.body = out;
        Ok(result)
    }

    /// 查找图片源文件
    fn locate(&self, image_name: &str, note_dir: &Path) -> Option<PathBuf> {
        if !is_relative_name(image_name) {
            warn!("Image reference is not a plain relative path: {}", image_name);
            return None;
        }

        let candidates = [note_dir.join(image_name), self.vault_root.join(image_name)];
        let found = candidates.iter().find(|p| p.is_file()).cloned();
        if found.is_none() {
            warn!(
                "Image not found at {}",
                candidates[candidates.len() - 1].display()
            );
        }
        found
    }

    fn copy_image(&self, source: &Path, image_name: &str) -> AppResult<PathBuf> {
        let dest = self.images_dir.join(image_name);
        let dest_dir = dest.parent().unwrap_or(self.images_dir.as_path());
        fs::create_dir_all(dest_dir).map_err(|e| AppError::create_dir_failed(dest_dir, e))?;
        fs::copy(source, &dest).map_err(|e| AppError::copy_failed(source, &dest, e))?;
        debug!("复制图片: {} -> {}", source.display(), dest.display());
        Ok(dest)
    }
}

/// 非空，且只由普通路径段组成（不允许 `..`、绝对路径）
fn is_relative_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing_subscriber::fmt::writer::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedLogBuffer {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl SharedLogBuffer {
        fn warn_lines(&self) -> usize {
            let guard = self.inner.lock().unwrap();
            String::from_utf8_lossy(&guard)
                .lines()
                .filter(|line| line.contains("WARN"))
                .count()
        }
    }

    struct SharedLogWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl<'a> MakeWriter<'a> for SharedLogBuffer {
        type Writer = SharedLogWriter;

        fn make_writer(&'a self) -> Self::Writer {
            SharedLogWriter {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl io::Write for SharedLogWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.inner.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// 在捕获日志的 subscriber 下执行一次改写，返回结果和 WARN 行数
    fn rewrite_with_logs(f: &Fixture, body: &str, note_dir: &Path) -> (ImageRewrite, usize) {
        let logs = SharedLogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::WARN)
            .with_writer(logs.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || {
            service(f).rewrite(body, note_dir).unwrap()
        });
        (result, logs.warn_lines())
    }

    struct Fixture {
        _tmp: TempDir,
        vault: PathBuf,
        images: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let vault = tmp.path().join("vault");
        let images = tmp.path().join("site/assets/images");
        fs::create_dir_all(vault.join("sub")).unwrap();
        Fixture {
            _tmp: tmp,
            vault,
            images,
        }
    }

    fn service(f: &Fixture) -> ImageService {
        ImageService::new(&f.vault, &f.images, "/assets/images")
    }

    #[test]
    fn test_image_in_note_dir_is_copied_and_rewritten() {
        let f = fixture();
        fs::write(f.vault.join("sub/cat.png"), b"from-sub").unwrap();

        let result = service(&f)
            .rewrite("Look: ![[cat.png]] done", &f.vault.join("sub"))
            .unwrap();

        assert_eq!(result.body, "Look: ![](/assets/images/cat.png) done");
        assert!(result.missing.is_empty());
        assert_eq!(fs::read(f.images.join("cat.png")).unwrap(), b"from-sub");
    }

    #[test]
    fn test_note_dir_wins_over_vault_root() {
        let f = fixture();
        fs::write(f.vault.join("sub/cat.png"), b"from-sub").unwrap();
        fs::write(f.vault.join("cat.png"), b"from-root").unwrap();

        service(&f).rewrite("![[cat.png]]", &f.vault.join("sub")).unwrap();

        assert_eq!(fs::read(f.images.join("cat.png")).unwrap(), b"from-sub");
    }

    #[test]
    fn test_falls_back_to_vault_root() {
        let f = fixture();
        fs::write(f.vault.join("dog.jpg"), b"root").unwrap();

        let result = service(&f).rewrite("![[dog.jpg]]", &f.vault.join("sub")).unwrap();

        assert_eq!(result.body, "![](/assets/images/dog.jpg)");
        assert_eq!(result.copied, vec![f.images.join("dog.jpg")]);
    }

    #[test]
    fn test_missing_image_left_unchanged() {
        let f = fixture();
        let body = "before ![[ghost.png]] after";

        let result = service(&f).rewrite(body, &f.vault.join("sub")).unwrap();

        assert_eq!(result.body, body);
        assert_eq!(result.missing, vec!["ghost.png".to_string()]);
        assert!(!f.images.exists());
    }

    #[test]
    fn test_mixed_found_and_missing() {
        let f = fixture();
        fs::write(f.vault.join("a.png"), b"a").unwrap();

        let result = service(&f)
            .rewrite("![[a.png]]\n![[b.png]]\n[[Link]]", &f.vault)
            .unwrap();

        assert_eq!(result.body, "![](/assets/images/a.png)\n![[b.png]]\n[[Link]]");
        assert_eq!(result.copied.len(), 1);
        assert_eq!(result.missing, vec!["b.png".to_string()]);
    }

    #[test]
    fn test_parent_dir_reference_not_resolved() {
        let f = fixture();
        fs::write(f.vault.join("secret.png"), b"x").unwrap();
        let body = "![[../secret.png]]";

        let result = service(&f).rewrite(body, &f.vault.join("sub")).unwrap();

        assert_eq!(result.body, body);
        assert_eq!(result.missing.len(), 1);
    }

    #[test]
    fn test_missing_image_warns_once() {
        let f = fixture();

        let (result, warnings) = rewrite_with_logs(&f, "x ![[ghost.png]] y", &f.vault.join("sub"));

        assert_eq!(result.missing.len(), 1);
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_parent_dir_reference_warns_once() {
        let f = fixture();
        fs::write(f.vault.join("secret.png"), b"x").unwrap();

        let (result, warnings) = rewrite_with_logs(&f, "![[../secret.png]]", &f.vault.join("sub"));

        assert_eq!(result.missing.len(), 1);
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_one_warning_per_unresolved_embed() {
        let f = fixture();
        fs::write(f.vault.join("a.png"), b"a").unwrap();

        let (result, warnings) = rewrite_with_logs(
            &f,
            "![[a.png]] ![[b.png]] ![[b.png]] ![[/etc/passwd]]",
            &f.vault,
        );

        assert_eq!(result.copied.len(), 1);
        assert_eq!(result.missing.len(), 3);
        assert_eq!(warnings, 3);
    }
}
