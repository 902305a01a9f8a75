//! 外部下载程序客户端
//!
//! 以子进程方式调用 aria2c（或兼容 `-d <dir> <url>` 参数的程序）

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// 单次下载调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub success: bool,
    /// 进程退出码（被信号终止时为 None）
    pub code: Option<i32>,
}

/// 下载能力：接收 URL 与目标目录
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn run_download(&self, url: &str, destination_dir: &Path) -> AppResult<DownloadOutcome>;
}

/// aria2c 下载客户端
pub struct Aria2Client {
    program: String,
}

impl Aria2Client {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Aria2Client {
    fn default() -> Self {
        Self::new("aria2c")
    }
}

#[async_trait]
impl DownloadSink for Aria2Client {
    async fn run_download(&self, url: &str, destination_dir: &Path) -> AppResult<DownloadOutcome> {
        tokio::fs::create_dir_all(destination_dir).await?;

        debug!(
            "执行: {} -d {} {}",
            self.program,
            destination_dir.display(),
            url
        );

        let status = Command::new(&self.program)
            .arg("-d")
            .arg(destination_dir)
            .arg(url)
            .status()
            .await
            .map_err(|e| AppError::download_failed(url, e))?;

        Ok(DownloadOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}
