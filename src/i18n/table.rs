//! 翻译表模块
//!
//! 将各语言的扁平翻译映射合并为单一的键→{语言→译文}表，并提供带回退链的
//! 查询。表是显式构造、按值传递的，没有进程级单例；渲染层通过构造参数接收。

use crate::i18n::error::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// 默认配置文件路径
const DEFAULT_CONFIG_PATH: &str = "languages.yaml";

/// 语言配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// 默认语言代码
    pub default_language: String,
    /// 所有启用的语言代码
    pub languages: Vec<String>,
    /// 回退链：语言代码 → 回退语言；"*"为通配默认回退
    #[serde(default)]
    pub fallbacks: HashMap<String, String>,
}

impl LocaleConfig {
    /// 创建新的语言配置，所有语言默认回退到默认语言
    pub fn new(default_language: String, languages: Vec<String>) -> Self {
        let mut fallbacks = HashMap::new();
        fallbacks.insert("*".to_string(), default_language.clone());
        Self {
            default_language,
            languages,
            fallbacks,
        }
    }

    /// 从YAML配置文件中加载语言配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| I18nError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        let config: LocaleConfig = serde_yml::from_str(&content)
            .map_err(|e| I18nError::ConfigError(format!("配置文件格式错误: {}", e)))?;

        if !config.languages.contains(&config.default_language) {
            return Err(I18nError::ConfigError(format!(
                "默认语言 {} 不在语言列表中",
                config.default_language
            )));
        }

        Ok(config)
    }

    /// 生成默认配置文件
    ///
    /// 配置文件将生成为当前目录下的 `languages.yaml`
    ///
    /// # 返回值
    /// * `Result<()>` - 生成成功返回Ok，失败返回错误
    pub fn generate_default_config() -> Result<()> {
        let default_config = Self::new(
            "en".to_string(),
            vec!["en".to_string(), "es".to_string(), "fr".to_string(), "de".to_string()],
        );
        let yaml_content = serde_yml::to_string(&default_config)
            .map_err(|e| I18nError::ConfigError(format!("序列化配置失败: {}", e)))?;

        // 在YAML内容前添加注释说明
        let content_with_header = format!(
            "# 语言配置文件\n# languages: 启用的语言代码列表\n# fallbacks: 回退链，\"*\"为通配默认回退\n\n{}",
            yaml_content
        );

        fs::write(DEFAULT_CONFIG_PATH, content_with_header)
            .map_err(|e| I18nError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 获取指定语言的回退语言
    pub fn fallback_of(&self, language: &str) -> Option<&str> {
        self.fallbacks
            .get(language)
            .or_else(|| self.fallbacks.get("*"))
            .map(String::as_str)
    }
}

/// 读取单个语言的JSON文件为扁平映射
fn read_language_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 多语言翻译表：键 → (语言 → 译文)
#[derive(Debug, Clone)]
pub struct LocaleTable {
    config: LocaleConfig,
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl LocaleTable {
    /// 由各语言的扁平映射合并构造翻译表
    ///
    /// 某个键在某语言缺失时，该语言在该键的子映射中就是缺失的，
    /// 由查询方通过回退链解决。空译文不会被存入。
    ///
    /// # 参数
    /// * `config` - 语言配置
    /// * `maps` - (语言代码, 扁平映射)的列表
    pub fn from_maps(
        config: LocaleConfig,
        maps: impl IntoIterator<Item = (String, BTreeMap<String, String>)>,
    ) -> LocaleTable {
        let mut entries: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for (language, map) in maps {
            for (key, text) in map {
                if text.is_empty() {
                    continue;
                }
                entries.entry(key).or_default().insert(language.clone(), text);
            }
        }

        LocaleTable { config, entries }
    }

    /// 从JSON目录加载所有配置语言并合并
    ///
    /// 对每个语言读取 `{locales_dir}/{lang}.json`；非默认语言的文件缺失、
    /// 不可读或格式错误时打印警告并跳过，只有默认语言的加载失败是致命错误。
    ///
    /// # 参数
    /// * `config` - 语言配置
    /// * `locales_dir` - 各语言JSON文件所在目录
    ///
    /// # 返回值
    /// * `Result<LocaleTable>` - 合并后的翻译表
    pub fn load<P: AsRef<Path>>(config: LocaleConfig, locales_dir: P) -> Result<LocaleTable> {
        let locales_dir = locales_dir.as_ref();
        let mut maps = Vec::new();

        for language in &config.languages {
            let path = locales_dir.join(format!("{}.json", language));
            let is_default = *language == config.default_language;

            if !path.exists() {
                if is_default {
                    return Err(I18nError::MissingLanguageSource {
                        language: language.clone(),
                        path: path.display().to_string(),
                    });
                }
                println!("警告: 未找到语言文件 {}，跳过", path.display());
                continue;
            }

            match read_language_map(&path) {
                Ok(map) => maps.push((language.clone(), map)),
                Err(e) if !is_default => {
                    println!("警告: 无法加载语言文件 {}: {}，跳过", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Self::from_maps(config, maps))
    }

    /// 直接查询指定(键, 语言)的译文，不走回退链
    pub fn get(&self, key: &str, language: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|languages| languages.get(language))
            .map(String::as_str)
    }

    /// 查询译文，缺失时沿回退链解析
    ///
    /// 回退链长度以语言总数为上限，配置成环时不会死循环。
    pub fn translate(&self, key: &str, language: &str) -> Option<&str> {
        let mut current = language;

        for _ in 0..=self.config.languages.len() {
            if let Some(text) = self.get(key, current) {
                return Some(text);
            }
            match self.config.fallback_of(current) {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }

        None
    }

    /// 获取表中的键总数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 检查表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 遍历所有(键, 语言→译文)条目
    pub fn entries(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, String>)> {
        self.entries.iter()
    }

    /// 获取语言配置
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }
}
