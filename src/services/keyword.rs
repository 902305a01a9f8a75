//! 关键词规范化与文件夹名格式化
//!
//! 两者共用同一张别名表，别名表由调用方注入

use crate::models::AliasTable;

const FOLDER_SUFFIX: &str = "Comics";

/// 规范化搜索关键词：转小写后依次应用别名替换
pub fn normalize(raw: &str, aliases: &AliasTable) -> String {
    aliases.apply(&raw.to_lowercase())
}

/// 由系列名生成下载目录名，如 `spider man` → `Spider-Man Comics`
///
/// 对自身输出（小写后）再次调用结果不变，不会重复追加后缀
pub fn format_folder_name(name: &str, aliases: &AliasTable) -> String {
    let normalized = normalize(name, aliases);
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let suffix = FOLDER_SUFFIX.to_lowercase();
    let words = match words.split_last() {
        Some((last, rest)) if *last == suffix => rest,
        _ => &words[..],
    };

    if words.is_empty() {
        return FOLDER_SUFFIX.to_string();
    }

    let title = words
        .iter()
        .map(|word| title_case_word(word))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {}", title, FOLDER_SUFFIX)
}

/// 每个连字符分段首字母大写（`spider-man` → `Spider-Man`）
fn title_case_word(word: &str) -> String {
    word.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            // 多字符大写形式（如 ß → SS）只大写第一个字符
            let mut upper = first.to_uppercase();
            upper
                .next()
                .into_iter()
                .chain(upper.flat_map(char::to_lowercase))
                .chain(chars.flat_map(char::to_lowercase))
                .collect()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_applies_aliases() {
        let aliases = AliasTable::default();
        assert_eq!(normalize("Spider Man Vol 2", &aliases), "spider-man vol 2");
        assert_eq!(normalize("MS MARVEL", &aliases), "ms. marvel");
        assert_eq!(normalize("Saga", &aliases), "saga");
        assert_eq!(normalize("", &aliases), "");
    }

    #[test]
    fn test_normalize_removes_alias_keys() {
        let aliases = AliasTable::default();
        for (from, to) in aliases.entries() {
            let input = format!("the amazing {} 2018", from.to_uppercase());
            let out = normalize(&input, &aliases);
            assert!(out.contains(to), "{} -> {}", input, out);
            assert!(!out.contains(from), "{} -> {}", input, out);
        }
    }

    #[test]
    fn test_format_folder_name() {
        let aliases = AliasTable::default();
        assert_eq!(format_folder_name("spider man", &aliases), "Spider-Man Comics");
        assert_eq!(format_folder_name("Ms Marvel", &aliases), "Ms. Marvel Comics");
        assert_eq!(format_folder_name("  the   walking dead ", &aliases), "The Walking Dead Comics");
        assert_eq!(format_folder_name("", &aliases), "Comics");
    }

    #[test]
    fn test_format_folder_name_is_idempotent() {
        let aliases = AliasTable::default();
        for name in ["spider man", "Saga Vol.", "ms marvel", "x", "", "comics", "Marvel Comics", "ßaga vol"] {
            let once = format_folder_name(name, &aliases);
            let twice = format_folder_name(&once.to_lowercase(), &aliases);
            assert_eq!(once, twice, "input: {:?}", name);
            assert!(!twice.ends_with("Comics Comics"), "input: {:?}", name);
        }
    }

    #[test]
    fn test_format_folder_name_multi_char_uppercase() {
        let aliases = AliasTable::default();
        assert_eq!(format_folder_name("ßaga vol", &aliases), "Ssaga Vol Comics");
    }
}
