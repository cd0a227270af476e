//! 内部链接改写 - 业务能力层
//!
//! `[[Page Name]]` -> `[Page Name](/notes/Page Name)`

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// 可选的 `!` 前缀 + 双中括号引用；不跨行，非贪婪
fn wiki_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(!?)\[\[(.*?)\]\]").expect("wiki link regex"))
}

/// 内部链接改写器
pub struct LinkRewriter {
    prefix: String,
}

impl LinkRewriter {
    /// 使用链接前缀创建，例如 `/notes`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// 改写正文中的所有 `[[Name]]`
    ///
    /// 带 `!` 前缀的嵌入（`![[...]]`）保持原样；目标不存在也照样改写，不做校验。
    /// 空格不做 URL 编码。
    pub fn rewrite(&self, body: &str) -> String {
        wiki_link_re()
            .replace_all(body, |caps: &Captures| {
                if !caps[1].is_empty() {
                    return caps[0].to_string();
                }
                let name = &caps[2];
                format!("[{}]({}/{})", name, self.prefix, name)
            })
            .into_owned()
    }
}
