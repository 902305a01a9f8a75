//! 搜索下载流程 - 流程层
//!
//! 核心职责：定义"一次搜索"的完整处理流程
//!
//! 流程顺序：
//! 1. 关键词规范化
//! 2. 抓取搜索页 → 分类（含大小查询）
//! 3. 抓取详情页 → 解析分卷链接
//! 4. 生成下载任务（目标目录由文件夹名格式化得出）
//!
//! 抓取失败不会向上抛出传输错误，而是降级为"无结果"/"无下载链接"

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::clients::catalog_client::build_search_url;
use crate::clients::PageFetcher;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AliasTable, DownloadTarget, SearchResult, VolumeLink, YearBuckets};
use crate::services::{format_folder_name, normalize, ResultClassifier, VolumeResolver};
use crate::utils::html::page_title;
use crate::workflow::search_ctx::SearchCtx;

/// 搜索下载流程
///
/// - 不持有终端 IO
/// - 只依赖抓取能力与业务能力（services）
pub struct SearchFlow<F: ?Sized> {
    fetcher: Arc<F>,
    base_url: Url,
    aliases: AliasTable,
    classifier: ResultClassifier<F>,
    resolver: VolumeResolver,
}

impl<F: PageFetcher + ?Sized> SearchFlow<F> {
    /// 创建新的搜索流程
    pub fn new(fetcher: Arc<F>, config: &Config) -> AppResult<Self> {
        let classifier = ResultClassifier::new(fetcher.clone(), config.catalog_domain()?)?;
        let resolver = VolumeResolver::new(config.download_prefix())?;

        Ok(Self {
            fetcher,
            base_url: Url::parse(&config.base_url)?,
            aliases: config.aliases.clone(),
            classifier,
            resolver,
        })
    }

    /// 由用户输入构造搜索上下文
    pub fn context(&self, raw_keyword: &str, page: u32) -> SearchCtx {
        SearchCtx::new(raw_keyword, normalize(raw_keyword, &self.aliases), page)
    }

    /// 抓取并分类搜索页，抓取失败时返回空分组
    pub async fn fetch_and_classify(&self, ctx: &SearchCtx) -> YearBuckets {
        let search_url = build_search_url(&self.base_url, &ctx.keyword, ctx.page);
        debug!("搜索地址: {}", search_url);

        let document = match self.fetcher.fetch(&search_url).await {
            Ok(document) => document,
            Err(e) => {
                warn!("{} 搜索页抓取失败: {}", ctx, e);
                return YearBuckets::new();
            }
        };
        debug!("页面标题: {:?}", page_title(&document));

        self.classifier.classify(&document, &ctx.keyword).await
    }

    /// 搜索，没有任何结果时返回 `NoResultsFound`
    pub async fn search(&self, ctx: &SearchCtx) -> AppResult<YearBuckets> {
        info!("{} 🔍 正在搜索...", ctx);
        let buckets = self.fetch_and_classify(ctx).await;

        if buckets.is_empty() {
            return Err(AppError::NoResultsFound {
                keyword: ctx.keyword.clone(),
            });
        }

        for (year, entries) in buckets.iter() {
            debug!("{} [{}] {} 条", ctx, year, entries.len());
        }
        info!(
            "{} ✓ 找到 {} 个结果 (年份: {})",
            ctx,
            buckets.len(),
            buckets.years().collect::<Vec<_>>().join(", ")
        );
        Ok(buckets)
    }

    /// 解析选中条目的分卷下载链接
    ///
    /// 详情页抓取失败或没有匹配时返回 `NoDownloadTargetsFound`
    pub async fn resolve(&self, ctx: &SearchCtx, selected: &SearchResult) -> AppResult<Vec<VolumeLink>> {
        let not_found = || AppError::NoDownloadTargetsFound {
            title: selected.display_text.clone(),
        };

        let document = match self.fetcher.fetch(&selected.target_url).await {
            Ok(document) => document,
            Err(e) => {
                warn!("{} 详情页抓取失败: {}", ctx, e);
                return Err(not_found());
            }
        };

        let links = self.resolver.resolve_volumes(
            &document,
            &ctx.keyword,
            ctx.mode,
            &selected.display_text,
        );
        if links.is_empty() {
            return Err(not_found());
        }
        Ok(links)
    }

    /// 下载目录：`<root>/<系列名格式化>`
    pub fn destination_dir(&self, download_root: &Path, selected: &SearchResult) -> std::path::PathBuf {
        download_root.join(format_folder_name(&selected.series_name(), &self.aliases))
    }

    /// 为选中的分卷生成下载任务
    pub fn plan_downloads(
        &self,
        download_root: &Path,
        selected: &SearchResult,
        links: &[&VolumeLink],
    ) -> Vec<DownloadTarget> {
        let dir = self.destination_dir(download_root, selected);
        links
            .iter()
            .map(|link| DownloadTarget::new(link.url.clone(), dir.clone()))
            .collect()
    }
}
