/// 目录站点客户端
///
/// 封装所有与目录站点 HTTP 交互相关的逻辑
use crate::config::Config;
use crate::error::{AppError, AppResult, FetchError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/131.0.0.0 Safari/537.36";

/// 文档抓取能力：URL → HTML 正文或失败
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// 目录站点 HTTP 客户端
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// 创建新的目录站点客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::config(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
        })
    }

    /// 构造搜索地址：`<base>/page/<page>/?s=<keyword>`
    pub fn search_url(&self, keyword: &str, page: u32) -> String {
        build_search_url(&self.base_url, keyword, page)
    }
}

/// 构造搜索地址，关键词按表单编码（空格变为 `+`）
pub fn build_search_url(base_url: &Url, keyword: &str, page: u32) -> String {
    let mut url = base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{}/page/{}/", base_path, page.max(1)));
    url.query_pairs_mut().clear().append_pair("s", keyword);
    url.to_string()
}

#[async_trait]
impl PageFetcher for CatalogClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!("HTTP 状态码: {} ({})", status.as_u16(), url);
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}
