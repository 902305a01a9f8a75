use std::fmt;
use std::path::PathBuf;

/// 未能推断出年份或大小时使用的占位值
pub const UNKNOWN: &str = "Unknown";

/// 搜索结果条目
///
/// 身份由 (display_text, target_url) 决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// 链接可见文本
    pub display_text: String,
    /// 详情页地址
    pub target_url: String,
    /// 四位年份或 "Unknown"
    pub year: String,
    /// 文件大小（如 "45 MB"）或 "Unknown"
    pub size_label: String,
}

impl SearchResult {
    /// 系列名：取标题的前两个词
    pub fn series_name(&self) -> String {
        self.display_text
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - Size: {}",
            self.year, self.display_text, self.size_label
        )
    }
}

/// 单卷下载链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeLink {
    pub url: String,
    /// 从 1 开始，按文档顺序连续分配
    pub volume_index: usize,
}

impl VolumeLink {
    /// 展示用标签，如 `Saga Vol 2: https://...`
    pub fn label(&self, title: &str) -> String {
        format!("{} Vol {}: {}", title, self.volume_index, self.url)
    }
}

/// 按年份分组的搜索结果
///
/// 分组顺序与组内顺序都保持源文档中的首次出现顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearBuckets {
    buckets: Vec<(String, Vec<SearchResult>)>,
}

impl YearBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到 `result.year` 对应的分组末尾
    pub fn push(&mut self, result: SearchResult) {
        match self.buckets.iter_mut().find(|(year, _)| *year == result.year) {
            Some((_, entries)) => entries.push(result),
            None => self.buckets.push((result.year.clone(), vec![result])),
        }
    }

    pub fn get(&self, year: &str) -> Option<&[SearchResult]> {
        self.buckets
            .iter()
            .find(|(y, _)| y == year)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(y, _)| y.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SearchResult])> {
        self.buckets
            .iter()
            .map(|(y, entries)| (y.as_str(), entries.as_slice()))
    }

    /// 展开为编号列表使用的顺序：先按分组，再按组内顺序
    pub fn flatten(&self) -> Vec<&SearchResult> {
        self.buckets
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .collect()
    }

    /// 条目总数
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// 下载任务：一个 URL 对应一个目标目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub destination_dir: PathBuf,
}

impl DownloadTarget {
    pub fn new(url: impl Into<String>, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination_dir: destination_dir.into(),
        }
    }
}
