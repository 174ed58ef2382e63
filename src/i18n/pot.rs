//! POT模板更新模块
//!
//! 从页面模板中提取可翻译键，并增量更新messages.pot：
//! 只追加尚未出现的键，已有条目及其行号引用注释保持原样不动。

use crate::i18n::error::Result;
use crate::i18n::po::{classify_line, PoLine};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 匹配模板中 {{ 'key' | i18n }} 形式的过滤器调用
static I18N_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{\{\s*['"`]([^'"`]+)['"`]\s*\|\s*i18n\s*\}\}"#).expect("i18n键正则表达式无效")
});

/// 从模板中提取出的可翻译消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotMessage {
    /// 翻译键
    pub key: String,
    /// 出现位置的"文件:行号"引用列表
    pub references: Vec<String>,
}

/// 递归收集目录下所有.njk模板文件
fn collect_template_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            collect_template_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "njk") {
            files.push(path);
        }
    }
    Ok(())
}

/// 扫描模板目录，提取所有可翻译键
///
/// 文件按路径排序后扫描，同一个键的多处出现合并为一条消息，
/// 引用按发现顺序记录。
///
/// # 参数
/// * `templates_dir` - 模板根目录
///
/// # 返回值
/// * `Result<Vec<PotMessage>>` - 按首次出现顺序排列的消息列表
pub fn extract_template_keys<P: AsRef<Path>>(templates_dir: P) -> Result<Vec<PotMessage>> {
    let mut files = Vec::new();
    collect_template_files(templates_dir.as_ref(), &mut files)?;
    files.sort();

    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, Vec<String>> = HashMap::new();

    for file in &files {
        let source = fs::read_to_string(file)?;

        for captures in I18N_KEY_PATTERN.captures_iter(&source) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            let line = source[..whole.start()].matches('\n').count() + 1;
            let reference = format!("{}:{}", file.display(), line);

            let key = key.as_str().to_string();
            if !by_key.contains_key(&key) {
                order.push(key.clone());
            }
            by_key.entry(key).or_default().push(reference);
        }
    }

    Ok(order
        .into_iter()
        .map(|key| {
            let references = by_key.remove(&key).unwrap_or_default();
            PotMessage { key, references }
        })
        .collect())
}

/// 收集POT文件中已有的msgid键
fn existing_msgids(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter_map(|line| match classify_line(line) {
            PoLine::Msgid(key) if !key.is_empty() => Some(key.to_string()),
            _ => None,
        })
        .collect()
}

/// 将一条消息格式化为POT条目
fn format_entry(message: &PotMessage) -> String {
    let mut entry = String::from("\n");
    for reference in &message.references {
        entry.push_str(&format!("#: {}\n", reference));
    }
    entry.push_str(&format!("msgid \"{}\"\nmsgstr \"\"\n", message.key));
    entry
}

/// 增量更新POT文件
///
/// 文件已存在时，只追加其中尚未出现的键，已有内容保持字节级不变；
/// 文件不存在时，创建带最小头部条目的新文件。
///
/// # 参数
/// * `pot_path` - POT文件路径
/// * `messages` - 从模板中提取的全部消息
///
/// # 返回值
/// * `Result<usize>` - 新增的条目数
pub fn update_pot_file<P: AsRef<Path>>(pot_path: P, messages: &[PotMessage]) -> Result<usize> {
    let pot_path = pot_path.as_ref();

    if pot_path.exists() {
        let existing = fs::read_to_string(pot_path)?;
        let existing_keys = existing_msgids(&existing);

        let new_messages: Vec<&PotMessage> = messages
            .iter()
            .filter(|message| !existing_keys.contains(&message.key))
            .collect();

        if new_messages.is_empty() {
            return Ok(0);
        }

        let mut appended = String::new();
        for message in &new_messages {
            appended.push_str(&format_entry(message));
        }

        let mut file = OpenOptions::new().append(true).open(pot_path)?;
        file.write_all(appended.as_bytes())?;

        Ok(new_messages.len())
    } else {
        let mut content = String::from(
            "msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
        );
        for message in messages {
            content.push_str(&format_entry(message));
        }

        fs::write(pot_path, content)?;
        Ok(messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keys_with_references() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(
            dir.path().join("index.njk"),
            "<h1>{{ 'page_title' | i18n }}</h1>\n<p>{{ \"hero_description\" | i18n }}</p>\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("pages/about.njk"),
            "{{ 'page_title' | i18n }}\n",
        )
        .unwrap();

        let messages = extract_template_keys(dir.path()).unwrap();
        assert_eq!(messages.len(), 2);

        let title = messages.iter().find(|m| m.key == "page_title").unwrap();
        assert_eq!(title.references.len(), 2);
        assert!(title.references[0].ends_with("index.njk:1"));
        assert!(title.references[1].ends_with("about.njk:1"));

        let hero = messages.iter().find(|m| m.key == "hero_description").unwrap();
        assert!(hero.references[0].ends_with("index.njk:2"));
    }

    #[test]
    fn test_non_template_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "{{ 'ignored' | i18n }}").unwrap();

        let messages = extract_template_keys(dir.path()).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_create_new_pot_file() {
        let dir = tempfile::tempdir().unwrap();
        let pot_path = dir.path().join("messages.pot");

        let messages = vec![PotMessage {
            key: "greeting".to_string(),
            references: vec!["src/index.njk:3".to_string()],
        }];

        let added = update_pot_file(&pot_path, &messages).unwrap();
        assert_eq!(added, 1);

        let content = fs::read_to_string(&pot_path).unwrap();
        assert!(content.starts_with("msgid \"\"\n"));
        assert!(content.contains("#: src/index.njk:3\nmsgid \"greeting\"\nmsgstr \"\"\n"));
    }

    #[test]
    fn test_update_appends_only_new_keys() {
        let dir = tempfile::tempdir().unwrap();
        let pot_path = dir.path().join("messages.pot");

        let initial = vec![PotMessage {
            key: "old_key".to_string(),
            references: vec!["src/a.njk:1".to_string()],
        }];
        update_pot_file(&pot_path, &initial).unwrap();
        let before = fs::read_to_string(&pot_path).unwrap();

        let messages = vec![
            PotMessage {
                key: "old_key".to_string(),
                references: vec!["src/a.njk:9".to_string()],
            },
            PotMessage {
                key: "new_key".to_string(),
                references: vec!["src/b.njk:2".to_string()],
            },
        ];
        let added = update_pot_file(&pot_path, &messages).unwrap();
        assert_eq!(added, 1);

        let after = fs::read_to_string(&pot_path).unwrap();
        // 已有内容保持字节级不变
        assert!(after.starts_with(&before));
        assert!(after.contains("msgid \"new_key\""));
        // 旧键的新引用不会被写入
        assert!(!after.contains("src/a.njk:9"));
    }

    #[test]
    fn test_update_without_new_keys_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let pot_path = dir.path().join("messages.pot");

        let messages = vec![PotMessage {
            key: "only_key".to_string(),
            references: vec!["src/a.njk:1".to_string()],
        }];
        update_pot_file(&pot_path, &messages).unwrap();
        let before = fs::read_to_string(&pot_path).unwrap();

        let added = update_pot_file(&pot_path, &messages).unwrap();
        assert_eq!(added, 0);
        assert_eq!(fs::read_to_string(&pot_path).unwrap(), before);
    }
}
