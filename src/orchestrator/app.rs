//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建站点客户端、下载客户端与流程对象
//! 2. **资源管理**：唯一持有 HTTP 客户端与下载程序客户端
//! 3. **运行会话**：把标准输入输出交给 `Session`

use crate::clients::{Aria2Client, CatalogClient};
use crate::config::Config;
use crate::orchestrator::session::{Session, SessionStats};
use crate::services::DownloadDispatcher;
use crate::utils::logging::log_startup;
use crate::workflow::SearchFlow;
use anyhow::Result;
use std::io;
use std::sync::Arc;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    catalog: Arc<CatalogClient>,
    downloader: Arc<Aria2Client>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let catalog = Arc::new(CatalogClient::new(&config)?);
        let downloader = Arc::new(Aria2Client::new(config.downloader_program.clone()));

        Ok(Self {
            config,
            catalog,
            downloader,
        })
    }

    /// 运行交互会话
    pub async fn run(&self, keyword: Option<String>, page: u32) -> Result<SessionStats> {
        let flow = SearchFlow::new(self.catalog.clone(), &self.config)?;
        let dispatcher =
            DownloadDispatcher::new(self.downloader.clone(), self.config.max_concurrent_downloads);

        let stdin = io::stdin();
        let mut session = Session::new(
            flow,
            dispatcher,
            self.config.download_root.clone(),
            stdin.lock(),
            io::stdout(),
        );
        let stats = session.run(keyword, page).await?;

        info!(
            "👋 会话结束: {} 轮搜索, 下载成功 {}, 失败 {}",
            stats.rounds, stats.succeeded, stats.failed
        );
        Ok(stats)
    }
}
