//! PO到JSON转换模块
//!
//! 将每个语言的PO源文件转换为供模板层消费的扁平JSON文件。
//! 只有在对应输入成功解析后才会写出文件。

use crate::i18n::error::{I18nError, Result};
use crate::i18n::po;
use crate::i18n::table::LocaleConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 将翻译映射序列化为JSON字符串（2空格缩进）
///
/// 映射本身有序，同一输入总是得到字节级一致的输出。
pub fn to_json_string(translations: &BTreeMap<String, String>) -> Result<String> {
    Ok(serde_json::to_string_pretty(translations)?)
}

/// 批量转换所有配置语言的PO文件
///
/// 对每个语言读取 `{po_dir}/{lang}.po`，解析后写出 `{output_dir}/{lang}.json`。
/// 非默认语言的源文件缺失或不可读时打印警告并跳过；只有默认语言的源文件
/// 加载失败是致命错误。
///
/// # 参数
/// * `config` - 语言配置
/// * `po_dir` - PO源文件目录
/// * `output_dir` - JSON输出目录（不存在时自动创建）
///
/// # 返回值
/// * `Result<usize>` - 成功转换的语言数
pub fn convert_all(config: &LocaleConfig, po_dir: &Path, output_dir: &Path) -> Result<usize> {
    fs::create_dir_all(output_dir)?;

    let mut processed = 0;
    for language in &config.languages {
        let po_path = po_dir.join(format!("{}.po", language));
        let is_default = *language == config.default_language;

        if !po_path.exists() {
            if is_default {
                return Err(I18nError::MissingLanguageSource {
                    language: language.clone(),
                    path: po_path.display().to_string(),
                });
            }
            println!("警告: 未找到语言源文件 {}，跳过", po_path.display());
            continue;
        }

        let content = match fs::read_to_string(&po_path) {
            Ok(content) => content,
            Err(e) => {
                if is_default {
                    return Err(e.into());
                }
                println!("警告: 无法读取语言源文件 {}: {}，跳过", po_path.display(), e);
                continue;
            }
        };
        let translations = po::parse_po(&content);
        let json = to_json_string(&translations)?;
        fs::write(output_dir.join(format!("{}.json", language)), json)?;

        println!("  {}: {} 条翻译", language, translations.len());
        processed += 1;
    }

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LocaleConfig {
        LocaleConfig::new(
            "en".to_string(),
            vec!["en".to_string(), "de".to_string()],
        )
    }

    #[test]
    fn test_convert_all_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let po_dir = dir.path().join("locales");
        let out_dir = dir.path().join("out");
        fs::create_dir_all(&po_dir).unwrap();

        fs::write(
            po_dir.join("en.po"),
            "msgid \"greeting\"\nmsgstr \"Hello\"\n",
        )
        .unwrap();
        fs::write(
            po_dir.join("de.po"),
            "msgid \"greeting\"\nmsgstr \"Hallo\"\n",
        )
        .unwrap();

        let processed = convert_all(&test_config(), &po_dir, &out_dir).unwrap();
        assert_eq!(processed, 2);

        let en: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(out_dir.join("en.json")).unwrap()).unwrap();
        assert_eq!(en["greeting"], "Hello");
    }

    #[test]
    fn test_convert_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let po_dir = dir.path().join("locales");
        let out_dir = dir.path().join("out");
        fs::create_dir_all(&po_dir).unwrap();

        fs::write(
            po_dir.join("en.po"),
            "msgid \"b\"\nmsgstr \"2\"\n\nmsgid \"a\"\nmsgstr \"1\"\n",
        )
        .unwrap();

        let config = LocaleConfig::new("en".to_string(), vec!["en".to_string()]);
        convert_all(&config, &po_dir, &out_dir).unwrap();
        let first = fs::read_to_string(out_dir.join("en.json")).unwrap();

        convert_all(&config, &po_dir, &out_dir).unwrap();
        let second = fs::read_to_string(out_dir.join("en.json")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_non_default_language_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let po_dir = dir.path().join("locales");
        let out_dir = dir.path().join("out");
        fs::create_dir_all(&po_dir).unwrap();

        fs::write(po_dir.join("en.po"), "msgid \"k\"\nmsgstr \"v\"\n").unwrap();

        let processed = convert_all(&test_config(), &po_dir, &out_dir).unwrap();
        assert_eq!(processed, 1);
        assert!(!out_dir.join("de.json").exists());
    }

    #[test]
    fn test_unreadable_secondary_source_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let po_dir = dir.path().join("locales");
        let out_dir = dir.path().join("out");
        fs::create_dir_all(&po_dir).unwrap();

        fs::write(po_dir.join("en.po"), "msgid \"k\"\nmsgstr \"v\"\n").unwrap();
        // de.po是目录而不是文件，读取会失败
        fs::create_dir_all(po_dir.join("de.po")).unwrap();

        let processed = convert_all(&test_config(), &po_dir, &out_dir).unwrap();
        assert_eq!(processed, 1);
        assert!(out_dir.join("en.json").exists());
        assert!(!out_dir.join("de.json").exists());
    }

    #[test]
    fn test_missing_default_language_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let po_dir = dir.path().join("locales");
        let out_dir = dir.path().join("out");
        fs::create_dir_all(&po_dir).unwrap();

        let result = convert_all(&test_config(), &po_dir, &out_dir);
        assert!(matches!(
            result,
            Err(I18nError::MissingLanguageSource { .. })
        ));
    }
}
