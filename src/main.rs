use anyhow::Result;
use clap::Parser;
use obsidian_to_jekyll::utils::logging;
use obsidian_to_jekyll::{App, Config};
use std::path::PathBuf;

/// 把 Obsidian 笔记库发布为 Jekyll 的 _posts / _notes
#[derive(Debug, Parser)]
#[command(name = "obsidian_to_jekyll", version, about)]
struct Cli {
    /// TOML 配置文件（也可用 PUBLISH_CONFIG 环境变量指定）
    #[arg(long, env = "PUBLISH_CONFIG")]
    config: Option<PathBuf>,
    /// Obsidian 笔记库根目录
    #[arg(long)]
    vault: Option<PathBuf>,
    /// Jekyll _posts 目录
    #[arg(long)]
    posts: Option<PathBuf>,
    /// Jekyll _notes 目录
    #[arg(long)]
    notes: Option<PathBuf>,
    /// 图片输出目录
    #[arg(long)]
    images: Option<PathBuf>,
    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(v) = self.vault {
            config.vault_path = v;
        }
        if let Some(v) = self.posts {
            config.posts_path = v;
        }
        if let Some(v) = self.notes {
            config.notes_path = v;
        }
        if let Some(v) = self.images {
            config.images_path = v;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run()?;

    Ok(())
}
