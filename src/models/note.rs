//! 笔记模型
//!
//! 一篇笔记 = YAML front matter（保持键的插入顺序）+ markdown 正文。

use crate::error::SkipReason;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Front matter 与正文的整体格式：`---\n<yaml>\n---\n<body>`
fn front_matter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)").expect("front matter regex"))
}

/// 输出容器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    /// `type: note`（默认）→ _notes
    Note,
    /// 其他任意 type → _posts
    Post,
}

impl NoteKind {
    /// 根据 `type` 字段的值分类
    pub fn from_type(note_type: &str) -> Self {
        if note_type == DEFAULT_TYPE {
            NoteKind::Note
        } else {
            NoteKind::Post
        }
    }
}

/// 默认 type
pub const DEFAULT_TYPE: &str = "note";

/// 已解析的笔记
#[derive(Debug, Clone)]
pub struct Note {
    /// 源文件路径
    pub path: PathBuf,
    /// front matter，键顺序与源文件一致
    pub front_matter: Mapping,
    /// markdown 正文
    pub body: String,
}

impl Note {
    /// 从文件内容解析笔记
    ///
    /// 只做结构检查（front matter 是否存在、是否为合法的 YAML 映射），
    /// 不做发布过滤。空的 front matter 解析为空映射，由 [`Note::is_publishable`] 拒绝。
    pub fn parse(path: &Path, content: &str) -> Result<Self, SkipReason> {
        let caps = front_matter_re()
            .captures(content)
            .ok_or(SkipReason::MissingFrontMatter)?;
        let yaml_str = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let value: Value = if yaml_str.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(yaml_str).map_err(SkipReason::InvalidFrontMatter)?
        };
        let front_matter = match value {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => return Err(SkipReason::NotAMapping),
        };

        Ok(Self {
            path: path.to_path_buf(),
            front_matter,
            body: body.to_string(),
        })
    }

    /// 读取字段
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.front_matter.get(key)
    }

    /// 读取字段，`null` 视为不存在
    pub fn get_present(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_null())
    }

    /// 发布门槛：`publish` 为真值且 `status` 不等于 `draft`
    pub fn is_publishable(&self) -> bool {
        let publish = self.get("publish").is_some_and(is_truthy);
        let draft = self.get("status").and_then(Value::as_str) == Some("draft");
        publish && !draft
    }

    /// `type` 字段，缺省为 `note`
    pub fn note_type(&self) -> String {
        self.get_present("type")
            .map(scalar_to_string)
            .unwrap_or_else(|| DEFAULT_TYPE.to_string())
    }

    /// 输出容器
    pub fn kind(&self) -> NoteKind {
        NoteKind::from_type(&self.note_type())
    }

    /// 标题，缺省为文件名（去掉 `.md`）
    pub fn title(&self) -> String {
        self.get_present("title")
            .map(scalar_to_string)
            .unwrap_or_else(|| file_stem(&self.path))
    }

    /// 源文件所在目录
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// YAML 值的真值判断
///
/// 字符串先按 YAML 1.1 的布尔写法识别（`no`、`off` 为假），其余非空即真。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => yaml11_bool(s).unwrap_or(!s.is_empty()),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// YAML 1.1 布尔字面量；serde_yaml 按 1.2 解析，这些会以字符串形式出现
///
/// 只认全小写、首字母大写、全大写三种形式，`y` / `n` 不算。
fn yaml11_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Some(true),
        "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

/// 把标量转成字符串；字符串原样返回
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.strip_suffix(".md").map(str::to_string).unwrap_or(name)
}
