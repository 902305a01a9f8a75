//! 搜索结果分类服务 - 业务能力层
//!
//! 把搜索页中的链接筛选、去重，并按出版年份分组；
//! 每个条目额外请求一次详情页来查询文件大小。

use crate::clients::PageFetcher;
use crate::error::AppResult;
use crate::models::{ResolutionMode, SearchResult, YearBuckets, UNKNOWN};
use crate::utils::html::{is_centered, parse_selector, visible_text};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// 通过筛选、尚未查询大小的链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub display_text: String,
    pub target_url: String,
    pub year: String,
}

/// 搜索结果分类器
pub struct ResultClassifier<F: ?Sized> {
    fetcher: Arc<F>,
    catalog_domain: String,
    year_pattern: Regex,
    size_pattern: Regex,
    list_size_pattern: Regex,
    anchor: Selector,
    paragraph: Selector,
    list_item: Selector,
}

impl<F: PageFetcher + ?Sized> ResultClassifier<F> {
    /// 创建分类器
    ///
    /// # 参数
    /// - `fetcher`: 用于查询大小的文档抓取能力
    /// - `catalog_domain`: 目录站点域名，只保留该域名（及子域名）下的链接
    pub fn new(fetcher: Arc<F>, catalog_domain: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            fetcher,
            catalog_domain: catalog_domain.into().to_lowercase(),
            year_pattern: Regex::new(r"\b(?:19|20)\d{2}\b")?,
            size_pattern: Regex::new(r"Size\s*:\s*([\d.]+\s*MB)")?,
            list_size_pattern: Regex::new(r"\(([\d.]+\s*MB)\)")?,
            anchor: parse_selector("a[href]")?,
            paragraph: parse_selector("p")?,
            list_item: parse_selector("li")?,
        })
    }

    /// 对搜索页分类
    ///
    /// 大小查询逐个串行进行，单个失败只会把该条目的大小降级为 "Unknown"
    pub async fn classify(&self, document: &str, keyword: &str) -> YearBuckets {
        let mode = ResolutionMode::from_keyword(keyword);
        let candidates = self.extract_candidates(document, keyword);
        debug!("符合条件的链接数量: {}", candidates.len());

        let mut buckets = YearBuckets::new();
        for candidate in candidates {
            let size_label = self.lookup_size(&candidate.target_url, keyword, mode).await;
            buckets.push(SearchResult {
                display_text: candidate.display_text,
                target_url: candidate.target_url,
                year: candidate.year,
                size_label,
            });
        }
        buckets
    }

    /// 从搜索页中提取候选链接（不发起网络请求）
    pub fn extract_candidates(&self, document: &str, keyword: &str) -> Vec<Candidate> {
        let html = Html::parse_document(document);
        let keyword = keyword.to_lowercase();
        let tokens: Vec<&str> = keyword.split_whitespace().collect();

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        let mut total = 0usize;

        for link in html.select(&self.anchor) {
            total += 1;
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let href = href.trim();
            if !self.is_catalog_url(href) {
                continue;
            }

            let text = visible_text(link);
            let lowered = text.to_lowercase();
            if !tokens.iter().any(|token| lowered.contains(token)) {
                continue;
            }

            if !seen.insert((text.clone(), href.to_string())) {
                continue;
            }

            candidates.push(Candidate {
                year: self.infer_year(href),
                display_text: text,
                target_url: href.to_string(),
            });
        }

        debug!("页面链接总数: {}", total);
        candidates
    }

    /// 取 URL 中第一个 19xx/20xx 年份，没有则为 "Unknown"
    pub fn infer_year(&self, url: &str) -> String {
        self.year_pattern
            .find(url)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// 是否为目录站点（或其子域名）下的绝对地址
    pub fn is_catalog_url(&self, href: &str) -> bool {
        let Ok(url) = Url::parse(href) else {
            return false;
        };
        match url.host_str() {
            Some(host) => {
                let host = host.to_lowercase();
                host == self.catalog_domain
                    || host.ends_with(&format!(".{}", self.catalog_domain))
            }
            None => false,
        }
    }

    /// 查询详情页中的文件大小
    ///
    /// 抓取失败时返回 "Unknown"
    pub async fn lookup_size(&self, page_url: &str, keyword: &str, mode: ResolutionMode) -> String {
        match self.fetcher.fetch(page_url).await {
            Ok(body) => self
                .extract_size(&body, keyword, mode)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            Err(e) => {
                warn!("查询大小失败，记为 Unknown: {}", e);
                UNKNOWN.to_string()
            }
        }
    }

    /// 从详情页提取大小
    ///
    /// 先找居中段落中的 `Size : N MB`；多卷模式下再找包含关键词的
    /// `<li>` 中的 `(N MB)`
    pub fn extract_size(&self, document: &str, keyword: &str, mode: ResolutionMode) -> Option<String> {
        let html = Html::parse_document(document);

        let from_paragraph = html
            .select(&self.paragraph)
            .filter(|p| is_centered(*p))
            .find_map(|p| capture(&self.size_pattern, &visible_text(p)));
        if from_paragraph.is_some() {
            return from_paragraph;
        }

        if !mode.is_volume_series() {
            return None;
        }

        let keyword = keyword.to_lowercase();
        html.select(&self.list_item).find_map(|li| {
            let text = visible_text(li);
            if text.to_lowercase().contains(&keyword) {
                capture(&self.list_size_pattern, &text)
            } else {
                None
            }
        })
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
