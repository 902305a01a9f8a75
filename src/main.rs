use anyhow::Result;
use clap::Parser;
use getcomics_cli::utils::logging;
use getcomics_cli::{App, Config};
use std::path::PathBuf;

/// 在 GetComics 上按关键词搜索漫画，按年份分组列出并下载
#[derive(Parser, Debug)]
#[command(name = "getcomics", version, about)]
struct Cli {
    /// 搜索关键词（可包含空格）；省略时交互输入
    keyword: Vec<String>,

    /// 搜索结果页码
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// TOML 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref()).await?;

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    let keyword = Some(cli.keyword.join(" ")).filter(|k| !k.trim().is_empty());

    // 初始化并运行应用
    let app = App::initialize(config)?;
    app.run(keyword, cli.page).await?;

    Ok(())
}
