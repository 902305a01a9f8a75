//! 详情页解析服务 - 业务能力层
//!
//! 把选中条目的详情页解析为按文档顺序编号的分卷下载链接

use crate::error::AppResult;
use crate::models::{ResolutionMode, VolumeLink};
use crate::utils::html::{parse_selector, visible_text};
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

/// 多卷模式下首选的下载链接文字
pub const MAIN_SERVER_LABEL: &str = "Main Server";
/// 单本模式下载按钮的 title 属性
pub const DOWNLOAD_BUTTON_TITLE: &str = "DOWNLOAD NOW";

/// 分卷链接解析器
pub struct VolumeResolver {
    download_prefix: String,
    anchor: Selector,
    list_item: Selector,
}

impl VolumeResolver {
    /// # 参数
    /// - `download_prefix`: 站点下载跳转链接前缀（如 `https://getcomics.org/dlds`）
    pub fn new(download_prefix: impl Into<String>) -> AppResult<Self> {
        let download_prefix: String = download_prefix.into();
        Ok(Self {
            download_prefix: download_prefix.trim_end_matches('/').to_string(),
            anchor: parse_selector("a[href]")?,
            list_item: parse_selector("li")?,
        })
    }

    /// 解析详情页
    ///
    /// 返回的 `volume_index` 从 1 开始连续编号；没有匹配时返回空列表
    pub fn resolve_volumes(
        &self,
        document: &str,
        keyword: &str,
        mode: ResolutionMode,
        comic_name: &str,
    ) -> Vec<VolumeLink> {
        let html = Html::parse_document(document);
        let urls = match mode {
            ResolutionMode::VolumeSeries => self.volume_series_urls(&html, keyword),
            ResolutionMode::SingleEdition => self.single_edition_urls(&html),
        };

        debug!("{} ({:?}) 解析到 {} 个下载链接", comic_name, mode, urls.len());

        urls.into_iter()
            .enumerate()
            .map(|(idx, url)| VolumeLink {
                url,
                volume_index: idx + 1,
            })
            .collect()
    }

    /// 多卷模式：文本包含关键词的 `<li>` 中的 "Main Server" 链接
    fn volume_series_urls(&self, html: &Html, keyword: &str) -> Vec<String> {
        let keyword = keyword.to_lowercase();
        let mut emitted = HashSet::new();
        let mut urls = Vec::new();

        for li in html.select(&self.list_item) {
            if !visible_text(li).to_lowercase().contains(&keyword) {
                continue;
            }
            for link in li.select(&self.anchor) {
                if !visible_text(link).contains(MAIN_SERVER_LABEL) {
                    continue;
                }
                // 嵌套的 <li> 会让同一个链接被扫描多次
                if !emitted.insert(link.id()) {
                    continue;
                }
                if let Some(href) = link.value().attr("href") {
                    urls.push(href.trim().to_string());
                }
            }
        }
        urls
    }

    /// 单本模式：title 为 "DOWNLOAD NOW" 且指向下载跳转地址的链接
    fn single_edition_urls(&self, html: &Html) -> Vec<String> {
        html.select(&self.anchor)
            .filter(|link| link.value().attr("title") == Some(DOWNLOAD_BUTTON_TITLE))
            .filter_map(|link| link.value().attr("href"))
            .map(str::trim)
            .filter(|href| self.is_download_url(href))
            .map(str::to_string)
            .collect()
    }

    /// 前缀之后必须是路径分隔符或结尾，`/dldsx` 不算下载地址
    fn is_download_url(&self, href: &str) -> bool {
        href.strip_prefix(self.download_prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AliasTable;
    use crate::services::keyword::normalize;

    fn resolver() -> VolumeResolver {
        VolumeResolver::new("https://getcomics.org/dlds").unwrap()
    }

    #[test]
    fn test_volume_mode_only_matching_list_item() {
        let keyword = normalize("spider man vol 2", &AliasTable::default());
        let page = r#"
            <ul>
              <li>Spider-Man Vol 1 (120 MB) <a href="https://a.example/1">Main Server</a></li>
              <li>Spider-Man Vol 2 (98 MB)
                  <a href="https://a.example/2">Main Server</a>
                  <a href="https://b.example/2">Mirror</a></li>
              <li>Spider-Man Vol 3 (77 MB) <a href="https://a.example/3">Main Server</a></li>
            </ul>
        "#;
        let mode = ResolutionMode::from_keyword(&keyword);
        assert_eq!(mode, ResolutionMode::VolumeSeries);

        let links = resolver().resolve_volumes(page, &keyword, mode, "Spider-Man");
        assert_eq!(
            links,
            vec![VolumeLink {
                url: "https://a.example/2".to_string(),
                volume_index: 1,
            }]
        );
    }

    #[test]
    fn test_volume_mode_indices_are_contiguous() {
        let page = r#"
            <ul>
              <li>Saga Vol 1 <a href="https://x/1">Main Server</a> <a href="https://x/1b">Main Server 2</a></li>
              <li>Nothing here <a href="https://x/skip">Main Server</a></li>
              <li>SAGA VOL 1 Deluxe <a href="https://x/2">Main Server</a></li>
            </ul>
        "#;
        let links =
            resolver().resolve_volumes(page, "saga vol 1", ResolutionMode::VolumeSeries, "Saga");
        let indices: Vec<usize> = links.iter().map(|l| l.volume_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(links[2].url, "https://x/2");
    }

    #[test]
    fn test_volume_mode_nested_list_items_emit_once() {
        let page = r#"
            <ul><li>Saga Vol 1 collection
              <ul><li>Saga Vol 1 part <a href="https://x/1">Main Server</a></li></ul>
            </li></ul>
        "#;
        let links =
            resolver().resolve_volumes(page, "saga vol 1", ResolutionMode::VolumeSeries, "Saga");
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_single_mode_requires_exact_title_and_prefix() {
        let page = r#"
            <a title="DOWNLOAD NOW" href="https://getcomics.org/dlds/aaa">Download</a>
            <a title="Download Now" href="https://getcomics.org/dlds/bbb">Download</a>
            <a title="DOWNLOAD NOW" href="https://mirror.example/dlds/ccc">Download</a>
            <a href="https://getcomics.org/dlds/ddd">Download</a>
            <a title="DOWNLOAD NOW" href="https://getcomics.org/dlds/eee">Download</a>
        "#;
        let links =
            resolver().resolve_volumes(page, "saga", ResolutionMode::SingleEdition, "Saga");
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://getcomics.org/dlds/aaa", "https://getcomics.org/dlds/eee"]
        );
        assert_eq!(links[1].volume_index, 2);
    }

    #[test]
    fn test_single_mode_prefix_stops_at_path_boundary() {
        let page = r#"
            <a title="DOWNLOAD NOW" href="https://getcomics.org/dldsx/evil">Download</a>
            <a title="DOWNLOAD NOW" href="https://getcomics.org/dlds-mirror/x">Download</a>
            <a title="DOWNLOAD NOW" href="https://getcomics.org/dlds/ok">Download</a>
        "#;
        let links =
            resolver().resolve_volumes(page, "saga", ResolutionMode::SingleEdition, "Saga");
        assert_eq!(
            links,
            vec![VolumeLink {
                url: "https://getcomics.org/dlds/ok".to_string(),
                volume_index: 1,
            }]
        );

        // 配置里带结尾斜杠的前缀同样生效
        let slashed = VolumeResolver::new("https://getcomics.org/dlds/").unwrap();
        let links = slashed.resolve_volumes(page, "saga", ResolutionMode::SingleEdition, "Saga");
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_modes_are_exclusive() {
        let page = r#"
            <ul><li>Saga <a href="https://x/1">Main Server</a></li></ul>
            <a title="DOWNLOAD NOW" href="https://getcomics.org/dlds/aaa">Download</a>
        "#;
        let r = resolver();
        let single = r.resolve_volumes(page, "saga", ResolutionMode::SingleEdition, "Saga");
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].url, "https://getcomics.org/dlds/aaa");

        let series = r.resolve_volumes(page, "saga", ResolutionMode::VolumeSeries, "Saga");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].url, "https://x/1");
    }

    #[test]
    fn test_no_matches_is_empty() {
        let r = resolver();
        assert!(r
            .resolve_volumes("<p>nothing</p>", "saga vol 1", ResolutionMode::VolumeSeries, "Saga")
            .is_empty());
        assert!(r
            .resolve_volumes("<p>nothing</p>", "saga", ResolutionMode::SingleEdition, "Saga")
            .is_empty());
    }
}
