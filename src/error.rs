use thiserror::Error;

/// 文档抓取错误（传输失败）
///
/// 任何非 2xx 状态码或传输层错误都归为此类
#[derive(Debug, Error)]
pub enum FetchError {
    /// 请求无法完成（DNS、连接、超时等）
    #[error("请求失败 ({url}): {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非成功状态码
    #[error("HTTP 状态异常 ({url}): {status}")]
    Status { url: String, status: u16 },
    /// 读取响应体失败
    #[error("读取响应体失败 ({url}): {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络抓取错误
    #[error("网络错误: {0}")]
    Fetch(#[from] FetchError),
    /// 搜索没有结果
    #[error("没有找到与 '{keyword}' 匹配的漫画")]
    NoResultsFound { keyword: String },
    /// 详情页没有可下载的链接
    #[error("没有找到可下载的链接: {title}")]
    NoDownloadTargetsFound { title: String },
    /// 用户输入无效
    #[error("无效的选择 '{input}'，有效范围 [1, {max}]")]
    InvalidSelection { input: String, max: usize },
    /// 下载程序启动或执行失败
    #[error("下载失败 ({url}): {source}")]
    Download {
        url: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置错误
    #[error("配置错误: {message}")]
    Config { message: String },
    /// CSS 选择器解析失败
    #[error("选择器 '{selector}' 解析失败: {message}")]
    Selector { selector: String, message: String },
    /// 正则表达式编译失败
    #[error("正则表达式错误: {0}")]
    Regex(#[from] regex::Error),
    /// 文件或终端 IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建无效选择错误
    pub fn invalid_selection(input: impl Into<String>, max: usize) -> Self {
        AppError::InvalidSelection {
            input: input.into(),
            max,
        }
    }

    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config {
            message: message.into(),
        }
    }

    /// 创建下载失败错误
    pub fn download_failed(url: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Download {
            url: url.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("TOML解析失败: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::config(format!("URL解析失败: {}", err))
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
