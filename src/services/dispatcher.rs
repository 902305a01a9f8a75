//! 下载分发服务 - 业务能力层
//!
//! 把一组下载任务交给外部下载程序并发执行：
//! - 使用 Semaphore 限制同时运行的数量
//! - 每个任务独立成败，互不影响
//! - 所有任务结束后才返回

use crate::clients::DownloadSink;
use crate::models::DownloadTarget;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 默认并发数
pub const DEFAULT_CONCURRENCY: usize = 4;

/// 分发结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl DispatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// 下载分发器
pub struct DownloadDispatcher<S: ?Sized> {
    sink: Arc<S>,
    concurrency: usize,
}

impl<S: DownloadSink + ?Sized + 'static> DownloadDispatcher<S> {
    /// 创建分发器，并发数为 0 时按 1 处理
    pub fn new(sink: Arc<S>, concurrency: usize) -> Self {
        Self {
            sink,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// 分发全部任务并等待结束
    pub async fn dispatch(&self, targets: Vec<DownloadTarget>) -> DispatchReport {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(targets.len());

        for (idx, target) in targets.into_iter().enumerate() {
            let task_index = idx + 1;
            let semaphore = semaphore.clone();
            let sink = self.sink.clone();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        error!("[下载 {}] 无法获取并发许可: {}", task_index, e);
                        return false;
                    }
                };

                info!("[下载 {}] ⬇️ 开始: {}", task_index, target.url);
                match sink.run_download(&target.url, &target.destination_dir).await {
                    Ok(outcome) if outcome.success => {
                        info!("[下载 {}] ✓ 完成", task_index);
                        true
                    }
                    Ok(outcome) => {
                        warn!("[下载 {}] ❌ 下载程序退出码: {:?}", task_index, outcome.code);
                        false
                    }
                    Err(e) => {
                        error!("[下载 {}] ❌ {}", task_index, e);
                        false
                    }
                }
            });
            handles.push((task_index, handle));
        }

        // 等待所有任务完成
        let mut report = DispatchReport::default();
        for (task_index, handle) in handles {
            match handle.await {
                Ok(true) => report.succeeded += 1,
                Ok(false) => report.failed += 1,
                Err(e) => {
                    error!("[下载 {}] 任务执行失败: {}", task_index, e);
                    report.failed += 1;
                }
            }
        }
        report
    }
}
