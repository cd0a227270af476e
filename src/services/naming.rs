//! 文件命名服务 - 业务能力层
//!
//! 负责生成 Jekyll 友好的文件名：`YYYY-MM-DD-slug.md`

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;
use std::time::SystemTime;

use crate::models::note::{is_truthy, scalar_to_string};

/// YAML 1.1 timestamp：日期或日期时间
fn timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:(?:[Tt]|[ \t]+)\d{1,2}:\d{2}:\d{2}(?:\.\d*)?(?:[ \t]*(?:Z|[-+]\d{1,2}(?::?\d{2})?))?)?$",
        )
        .expect("timestamp regex")
    })
}

fn non_slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\-]+").expect("slug regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// 把标题转换为 slug
///
/// 去掉所有非 ASCII 字母、数字、连字符的字符（包括空白），转小写，
/// 去掉首尾连字符，剩余空白折叠为连字符。对已有的 slug 再调用结果不变。
pub fn slugify(title: &str) -> String {
    let stripped = non_slug_re().replace_all(title, "");
    let lowered = stripped.to_lowercase();
    let trimmed = lowered.trim_matches('-');
    whitespace_re().replace_all(trimmed, "-").into_owned()
}

/// 把 front matter 里的 `date` 解析为输出用的日期字符串
///
/// - YAML timestamp（`2024-03-05`、`2024-03-05 10:00:00` 等）格式化为 `YYYY-MM-DD`
/// - 其他字符串原样使用
/// - 缺失或为假值（`null`、空字符串、`false`、`0`）返回 `None`，调用方改用文件修改时间
pub fn date_from_front_matter(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| is_truthy(v))?;
    let raw = scalar_to_string(value);
    Some(normalize_timestamp(&raw).unwrap_or(raw))
}

/// 识别 YAML timestamp 并只保留日期部分
fn normalize_timestamp(raw: &str) -> Option<String> {
    let caps = timestamp_re().captures(raw.trim())?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

/// 文件修改时间（本地时区）格式化为 `YYYY-MM-DD`
pub fn date_from_mtime(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime).format("%Y-%m-%d").to_string()
}

/// 输出文件名：`{date}-{slug}.md`
pub fn output_filename(date: &str, slug: &str) -> String {
    format!("{}-{}.md", date, slug)
}
