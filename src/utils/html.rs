//! HTML 查询辅助函数

use crate::error::{AppError, AppResult};
use scraper::{ElementRef, Html, Selector};

/// 解析 CSS 选择器，失败时转换为 `AppError::Selector`
pub fn parse_selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| AppError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// 元素的可见文本，连续空白折叠为单个空格
pub fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 页面 `<title>`，用于调试日志
pub fn page_title(document: &str) -> Option<String> {
    let html = Html::parse_document(document);
    let selector = parse_selector("title").ok()?;
    html.select(&selector)
        .next()
        .map(visible_text)
        .filter(|t| !t.is_empty())
}

/// `style` 属性是否声明了居中对齐（忽略空白与大小写）
pub fn is_centered(element: ElementRef<'_>) -> bool {
    element
        .value()
        .attr("style")
        .map(|style| {
            style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
                .contains("text-align:center")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<a href='x'>  Saga\n  <b>Vol. 1</b>  </a>");
        let a = doc.select(&parse_selector("a").unwrap()).next().unwrap();
        assert_eq!(visible_text(a), "Saga Vol. 1");
    }

    #[test]
    fn test_is_centered() {
        let doc = Html::parse_fragment(
            "<p style='text-align: center;'>a</p><p style='TEXT-ALIGN:CENTER'>b</p><p>c</p>",
        );
        let flags: Vec<bool> = doc
            .select(&parse_selector("p").unwrap())
            .map(is_centered)
            .collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_page_title() {
        assert_eq!(
            page_title("<html><head><title> Search Results </title></head></html>"),
            Some("Search Results".to_string())
        );
        assert_eq!(page_title("<p>no title</p>"), None);
    }

    #[test]
    fn test_bad_selector() {
        assert!(matches!(parse_selector("a[["), Err(AppError::Selector { .. })));
    }
}
