//! # Obsidian to Jekyll
//!
//! 把 Obsidian 笔记库转换为 Jekyll 可发布的 `_posts` / `_notes` 文件。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层
//! - `config` - 路径与链接前缀配置（默认值 → 配置文件 → 环境变量 → 命令行）
//! - `error` - 环境错误 `AppError` 与跳过原因 `SkipReason`
//! - `utils::logging` - tracing 初始化与运行统计输出
//!
//! ### ② 模型层
//! - `models::note` - 解析 front matter，发布过滤，按 type 分类
//!
//! ### ③ 业务能力层（Services）
//! - `output_cleaner` - 清空输出目录
//! - `link_rewriter` - `[[Name]]` → markdown 链接
//! - `image_service` - `![[image]]` → 图片链接 + 复制图片
//! - `naming` - 日期、slug、输出文件名
//!
//! ### ④ 流程层（Workflow）
//! - `NoteFlow` - 一篇笔记的完整处理流程
//!
//! ### ⑤ 编排层（Orchestration）
//! - `App` - 清空一次输出目录，然后逐篇处理笔记库中的 `.md` 文件

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, SkipReason};
pub use models::{Note, NoteKind};
pub use orchestrator::{App, ProcessingStats};
pub use workflow::{NoteFlow, NoteOutcome, PublishedNote};
