use std::path::{Path, PathBuf};
use thiserror::Error;

/// 应用程序错误类型
///
/// 只描述"环境出问题"的情况（写文件、复制图片、建目录失败等），
/// 一旦出现即中止本次运行。单篇笔记的预期问题见 [`SkipReason`]。
#[derive(Debug, Error)]
pub enum AppError {
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 复制图片失败
    #[error("复制图片失败 ({} -> {}): {source}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Front matter 序列化失败
    #[error("YAML 序列化失败: {0}")]
    Serialize(#[from] serde_yaml::Error),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({}): {source}", .path.display())]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({}): {source}", .path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 跳过一篇笔记的原因
///
/// 这些都是预期内的情况：记录日志后继续处理下一篇，不会中止批处理。
#[derive(Debug, Error)]
pub enum SkipReason {
    /// 文件无法读取或不是 UTF-8
    #[error("无法读取文件: {0}")]
    Unreadable(#[source] std::io::Error),
    /// 没有 `---` 包围的 front matter
    #[error("No valid YAML front matter found.")]
    MissingFrontMatter,
    /// front matter 不是合法的 YAML
    #[error("Invalid YAML front matter - {0}")]
    InvalidFrontMatter(#[source] serde_yaml::Error),
    /// front matter 是合法 YAML，但不是键值映射
    #[error("YAML front matter is not a key-value mapping.")]
    NotAMapping,
    /// 未标记发布，或状态为 draft
    #[error("'publish: true' not found or status is draft.")]
    NotPublishable,
}

impl SkipReason {
    /// 是否属于"发布过滤"而不是结构问题
    ///
    /// 过滤只记 info，结构问题记 warn。
    pub fn is_filter(&self) -> bool {
        matches!(self, SkipReason::NotPublishable)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建目录创建失败错误
    pub fn create_dir_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::CreateDirFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 创建文件写入失败错误
    pub fn write_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 创建图片复制失败错误
    pub fn copy_failed(from: impl AsRef<Path>, to: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::CopyFailed {
            from: from.as_ref().to_path_buf(),
            to: to.as_ref().to_path_buf(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
