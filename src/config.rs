use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 程序配置
///
/// 优先级（后者覆盖前者）：默认值 → TOML 配置文件 → 环境变量 → 命令行参数
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Obsidian 笔记库根目录
    pub vault_path: PathBuf,
    /// Jekyll 的 _posts 目录
    pub posts_path: PathBuf,
    /// Jekyll 的 _notes 目录
    pub notes_path: PathBuf,
    /// 图片输出目录
    pub images_path: PathBuf,
    /// 内部链接前缀，`[[Name]]` -> `[Name]({prefix}/Name)`
    pub note_link_prefix: String,
    /// 图片 URL 前缀，`![[a.png]]` -> `![]({prefix}/a.png)`
    pub image_url_prefix: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_path: PathBuf::from("./obsidian-vault"),
            posts_path: PathBuf::from("./blog/_posts"),
            notes_path: PathBuf::from("./blog/_notes"),
            images_path: PathBuf::from("./blog/assets/images"),
            note_link_prefix: "/notes".to_string(),
            image_url_prefix: "/assets/images".to_string(),
            verbose_logging: false,
        }
    }
}

/// 配置文件内容，所有字段都可省略
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub vault_path: Option<PathBuf>,
    pub posts_path: Option<PathBuf>,
    pub notes_path: Option<PathBuf>,
    pub images_path: Option<PathBuf>,
    pub note_link_prefix: Option<String>,
    pub image_url_prefix: Option<String>,
    pub verbose_logging: Option<bool>,
}

impl Config {
    /// 默认值 → 配置文件（可选）→ 环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(path) = config_file {
            config.apply_file(FileConfig::from_path(path)?);
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 用配置文件中出现的字段覆盖当前值
    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.vault_path {
            self.vault_path = v;
        }
        if let Some(v) = file.posts_path {
            self.posts_path = v;
        }
        if let Some(v) = file.notes_path {
            self.notes_path = v;
        }
        if let Some(v) = file.images_path {
            self.images_path = v;
        }
        if let Some(v) = file.note_link_prefix {
            self.note_link_prefix = v;
        }
        if let Some(v) = file.image_url_prefix {
            self.image_url_prefix = v;
        }
        if let Some(v) = file.verbose_logging {
            self.verbose_logging = v;
        }
    }

    /// 用环境变量覆盖当前值
    ///
    /// `lookup` 通常是 `std::env::var`，测试中可以传入固定的映射。
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OBSIDIAN_NOTES_PATH") {
            self.vault_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("JEKYLL_POSTS_PATH") {
            self.posts_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("JEKYLL_NOTES_PATH") {
            self.notes_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("JEKYLL_IMAGES_PATH") {
            self.images_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("NOTE_LINK_PREFIX") {
            self.note_link_prefix = v;
        }
        if let Some(v) = lookup("IMAGE_URL_PREFIX") {
            self.image_url_prefix = v;
        }
        self.verbose_logging = lookup("VERBOSE_LOGGING")
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.verbose_logging);
    }
}

impl FileConfig {
    /// 读取并解析 TOML 配置文件
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}
