//! 日志工具模块
//!
//! 初始化 tracing，并提供运行开始 / 结束时的日志输出

use crate::config::Config;
use crate::orchestrator::ProcessingStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug 或 info。重复调用不会报错。
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "obsidian_to_jekyll=debug"
        } else {
            "obsidian_to_jekyll=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始发布 Obsidian 笔记到 Jekyll");
    info!("📁 笔记库: {}", config.vault_path.display());
    info!("📝 _posts: {}", config.posts_path.display());
    info!("🗒️ _notes: {}", config.notes_path.display());
    info!("🖼️ 图片: {}", config.images_path.display());
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn log_final_stats(stats: &ProcessingStats) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 已发布: {}/{} (notes {}, posts {})",
        stats.published(),
        stats.total,
        stats.notes,
        stats.posts
    );
    info!("⏭️ 跳过: {}", stats.skipped);
    info!(
        "🖼️ 图片: 复制 {}，未找到 {}",
        stats.images_copied, stats.images_missing
    );
    if stats.clean_failures > 0 {
        info!("⚠️ 清理失败条目: {}", stats.clean_failures);
    }
    info!("{}", "=".repeat(60));
}
