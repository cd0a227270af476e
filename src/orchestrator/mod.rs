//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (清空输出目录，遍历 Vec<笔记文件>)
//!     ↓
//! workflow::NoteFlow (处理单篇笔记)
//!     ↓
//! services (能力层：链接 / 图片 / 命名 / 清理)
//!     ↓
//! models (Note：front matter + 正文)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断。

pub mod batch_processor;

pub use batch_processor::{App, ProcessingStats};
