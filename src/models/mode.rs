/// 详情页解析模式
///
/// 站点有两套模板：连载多卷发布页与单本合集页，
/// 二者没有可供机器识别的区分标记，只能依据搜索关键词判断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionMode {
    /// 多卷连载：按 `<li>` 分卷，取其中的 "Main Server" 链接
    VolumeSeries,
    /// 单本合集：取标题为 "DOWNLOAD NOW" 的下载按钮
    SingleEdition,
}

impl ResolutionMode {
    /// 触发多卷模式的关键词片段
    pub const VOLUME_MARKER: &'static str = "vol";

    /// 根据规范化后的关键词选择解析模式
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.to_lowercase().contains(Self::VOLUME_MARKER) {
            ResolutionMode::VolumeSeries
        } else {
            ResolutionMode::SingleEdition
        }
    }

    pub fn is_volume_series(self) -> bool {
        matches!(self, ResolutionMode::VolumeSeries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword() {
        assert_eq!(
            ResolutionMode::from_keyword("spider-man vol 2"),
            ResolutionMode::VolumeSeries
        );
        assert_eq!(
            ResolutionMode::from_keyword("Batman VOL. 1"),
            ResolutionMode::VolumeSeries
        );
        assert_eq!(
            ResolutionMode::from_keyword("saga"),
            ResolutionMode::SingleEdition
        );
        assert_eq!(ResolutionMode::from_keyword(""), ResolutionMode::SingleEdition);
    }
}
