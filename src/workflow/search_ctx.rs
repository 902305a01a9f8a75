//! 搜索上下文
//!
//! 封装"我正在用哪个关键词搜索第几页"这一信息

use crate::models::ResolutionMode;
use std::fmt::Display;

/// 一次搜索的上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCtx {
    /// 用户输入的原始关键词
    pub raw_keyword: String,

    /// 规范化后的关键词
    pub keyword: String,

    /// 搜索结果页码（从1开始）
    pub page: u32,

    /// 由关键词决定的详情页解析模式
    pub mode: ResolutionMode,
}

impl SearchCtx {
    /// 创建新的搜索上下文，`keyword` 须已规范化
    pub fn new(raw_keyword: impl Into<String>, keyword: impl Into<String>, page: u32) -> Self {
        let keyword = keyword.into();
        Self {
            raw_keyword: raw_keyword.into(),
            mode: ResolutionMode::from_keyword(&keyword),
            keyword,
            page: page.max(1),
        }
    }
}

impl Display for SearchCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[关键词 '{}' 第{}页 模式#{:?}]",
            self.keyword, self.page, self.mode
        )
    }
}
