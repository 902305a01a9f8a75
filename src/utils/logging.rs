use crate::config::Config;
use crate::services::DispatchReport;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别。
/// 重复初始化时静默忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("getcomics_cli={},getcomics={}", default_level, default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 站点: {}", config.base_url);
    info!("📁 下载目录: {}", config.download_root.display());
    info!("📊 最大并发下载数: {}", config.max_concurrent_downloads);
    info!("{}", "=".repeat(60));
}

/// 记录下载分发开始信息
///
/// # 参数
/// - `total`: 下载任务数
/// - `concurrency`: 并发数
/// - `destination`: 目标目录
pub fn log_dispatch_start(total: usize, concurrency: usize, destination: &std::path::Path) {
    info!("\n{}", "─".repeat(60));
    info!("📦 开始下载 {} 个文件（并发 {}）", total, concurrency);
    info!("📄 保存至: {}", destination.display());
    info!("{}", "─".repeat(60));
}

/// 打印下载统计信息
pub fn print_dispatch_stats(report: &DispatchReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 下载完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", report.succeeded, report.total());
    info!("❌ 失败: {}", report.failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
