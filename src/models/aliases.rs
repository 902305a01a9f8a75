//! 关键词别名表
//!
//! 别名一律使用小写的规范形式，大小写转换交给下游（如文件夹名格式化）处理。

use phf::phf_ordered_map;
use serde::Deserialize;

/// 内置别名表（定义顺序即应用顺序）
static DEFAULT_ALIASES: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "spider man" => "spider-man",
    "ms marvel" => "ms. marvel",
    "spider gwen" => "spider-gwen",
};

/// 单条别名（用于 TOML 配置）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Alias {
    pub from: String,
    pub to: String,
}

/// 有序别名表
///
/// 不可变配置值，由调用方注入到规范化与格式化逻辑中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    /// 使用给定条目创建别名表，键与值都会转为小写
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into().to_lowercase()))
                .filter(|(k, _)| !k.is_empty())
                .collect(),
        }
    }

    /// 合并额外的别名：已存在的键原地覆盖，新键追加到末尾
    pub fn with_overrides(mut self, extra: &[Alias]) -> Self {
        for alias in extra {
            let from = alias.from.to_lowercase();
            let to = alias.to.to_lowercase();
            if from.is_empty() {
                continue;
            }
            match self.entries.iter_mut().find(|(k, _)| *k == from) {
                Some(entry) => entry.1 = to,
                None => self.entries.push((from, to)),
            }
        }
        self
    }

    /// 按定义顺序依次做子串替换
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (from, to) in &self.entries {
            if out.contains(from.as_str()) {
                out = out.replace(from.as_str(), to);
            }
        }
        out
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new(DEFAULT_ALIASES.entries().map(|(k, v)| (*k, *v)))
    }
}
