use crate::error::{AppError, AppResult};
use crate::models::{Alias, AliasTable};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 目录站点根地址
    pub base_url: String,
    /// 下载跳转链接前缀，为空时使用 `<base_url>/dlds`
    pub download_prefix: Option<String>,
    /// 下载根目录
    pub download_root: PathBuf,
    /// 同时进行的下载数量
    pub max_concurrent_downloads: usize,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 外部下载程序
    pub downloader_program: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 关键词别名表
    pub aliases: AliasTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://getcomics.org".to_string(),
            download_prefix: None,
            download_root: PathBuf::from("Comic Book"),
            max_concurrent_downloads: 4,
            request_timeout_secs: 30,
            downloader_program: "aria2c".to_string(),
            verbose_logging: false,
            aliases: AliasTable::default(),
        }
    }
}

/// TOML 配置文件结构，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub download_prefix: Option<String>,
    pub download_root: Option<PathBuf>,
    pub max_concurrent_downloads: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub downloader_program: Option<String>,
    pub verbose_logging: Option<bool>,
    pub aliases: Vec<Alias>,
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("GETCOMICS_BASE_URL").unwrap_or(default.base_url),
            download_prefix: std::env::var("GETCOMICS_DOWNLOAD_PREFIX").ok().or(default.download_prefix),
            download_root: std::env::var("GETCOMICS_DOWNLOAD_ROOT").map(PathBuf::from).unwrap_or(default.download_root),
            max_concurrent_downloads: std::env::var("GETCOMICS_MAX_CONCURRENT_DOWNLOADS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_downloads),
            request_timeout_secs: std::env::var("GETCOMICS_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            downloader_program: std::env::var("GETCOMICS_DOWNLOADER").unwrap_or(default.downloader_program),
            verbose_logging: std::env::var("GETCOMICS_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            aliases: default.aliases,
        }
    }

    /// 加载配置：环境变量之上再叠加 TOML 文件
    ///
    /// 未显式指定路径时读取 `GETCOMICS_CONFIG`
    pub async fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = Self::from_env();
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("GETCOMICS_CONFIG").map(PathBuf::from));

        match path {
            Some(path) => {
                let file = load_config_file(&path).await?;
                config.merge(file).validated()
            }
            None => config.validated(),
        }
    }

    /// 用文件中的值覆盖当前配置
    pub fn merge(self, file: FileConfig) -> Self {
        Self {
            base_url: file.base_url.unwrap_or(self.base_url),
            download_prefix: file.download_prefix.or(self.download_prefix),
            download_root: file.download_root.unwrap_or(self.download_root),
            max_concurrent_downloads: file.max_concurrent_downloads.unwrap_or(self.max_concurrent_downloads),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(self.request_timeout_secs),
            downloader_program: file.downloader_program.unwrap_or(self.downloader_program),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
            aliases: self.aliases.with_overrides(&file.aliases),
        }
    }

    /// 校验根地址可解析且带有主机名
    pub fn validated(self) -> AppResult<Self> {
        self.catalog_domain()?;
        Ok(self)
    }

    /// 目录站点域名（取自 base_url）
    pub fn catalog_domain(&self) -> AppResult<String> {
        let url = Url::parse(&self.base_url)?;
        url.host_str()
            .map(str::to_lowercase)
            .ok_or_else(|| AppError::config(format!("base_url 缺少主机名: {}", self.base_url)))
    }

    /// 下载跳转链接前缀
    pub fn download_prefix(&self) -> String {
        self.download_prefix
            .clone()
            .unwrap_or_else(|| format!("{}/dlds", self.base_url.trim_end_matches('/')))
    }
}

/// 从 TOML 文件读取配置
pub async fn load_config_file(path: &Path) -> AppResult<FileConfig> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        AppError::config(format!("无法读取配置文件 {}: {}", path.display(), e))
    })?;
    let file: FileConfig = toml::from_str(&content)?;
    Ok(file)
}
