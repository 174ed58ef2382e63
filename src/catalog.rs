//! EPUB目录构建模块
//!
//! 扫描按分类组织的样例目录，逐个提取EPUB元数据，构建按修改时间排序的目录。
//! 单个文件的解析失败只会记录并跳过，不会中断整个构建。

use crate::epub::{self, PackageMetadata, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 分类名到目录条目列表的映射，每个分类内按修改时间升序
pub type Catalog = BTreeMap<String, Vec<CatalogEntry>>;

/// 目录中的单个EPUB条目
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub metadata: PackageMetadata,
    /// 所属分类（样例根目录下的子目录名）
    pub category: String,
    /// 相对于样例根目录的路径，统一使用正斜杠分隔
    pub relative_path: String,
}

/// 目录扫描得到的单个样例文件
///
/// 扫描与聚合分离，聚合是对列表快照的纯函数，便于注入测试替身。
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFile {
    pub category: String,
    pub path: PathBuf,
    pub relative_path: String,
}

/// 目录扫描的结果快照
///
/// 分类列表独立于文件列表记录：没有任何EPUB文件的分类也会出现在
/// 最终目录中，条目列表为空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleListing {
    /// 扫描到的所有分类名，已排序
    pub categories: Vec<String>,
    /// 所有分类下的EPUB文件
    pub samples: Vec<SampleFile>,
}

/// 扫描样例根目录，列出所有分类及其下的EPUB文件
///
/// 分类为根目录下的一级子目录；扩展名匹配不区分大小写。
/// 返回的列表按分类名和文件名排序，保证确定性。
///
/// # 参数
/// * `samples_root` - 样例根目录路径
///
/// # 返回值
/// * `Result<SampleListing>` - 分类与文件列表快照
pub fn scan_samples<P: AsRef<Path>>(samples_root: P) -> Result<SampleListing> {
    let samples_root = samples_root.as_ref();
    let mut listing = SampleListing::default();

    let mut categories: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(samples_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            categories.push((entry.file_name().to_string_lossy().to_string(), entry.path()));
        }
    }
    categories.sort();

    for (category, category_path) in categories {
        let mut file_names: Vec<String> = Vec::new();
        for entry in fs::read_dir(&category_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            if has_epub_extension(&file_name) {
                file_names.push(file_name);
            }
        }
        file_names.sort();

        for file_name in file_names {
            listing.samples.push(SampleFile {
                path: category_path.join(&file_name),
                relative_path: format!("{}/{}", category, file_name),
                category: category.clone(),
            });
        }
        listing.categories.push(category);
    }

    Ok(listing)
}

/// 检查文件名是否为EPUB扩展名（不区分大小写）
fn has_epub_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"))
}

/// 对列表快照构建目录
///
/// 逐个文件执行容器打开和元数据提取；任一环节失败时打印警告并跳过该文件，
/// 整体构建不会中断。每个扫描到的分类都会出现在目录中，即使其下没有任何
/// 可解析的文件。每个分类内的条目按修改时间升序排列，缺失或无法解析的
/// 时间戳使用远未来哨兵日期，排在所有有日期的条目之后。
///
/// # 参数
/// * `listing` - 由 `scan_samples` 或测试替身提供的快照
///
/// # 返回值
/// * `Catalog` - 按分类分组、按时间排序的目录
pub fn build_catalog(listing: &SampleListing) -> Catalog {
    let mut catalog = Catalog::new();

    for category in &listing.categories {
        catalog.entry(category.clone()).or_default();
    }

    for sample in &listing.samples {
        match epub::extract_metadata(&sample.path) {
            Ok(metadata) => {
                catalog
                    .entry(sample.category.clone())
                    .or_default()
                    .push(CatalogEntry {
                        metadata,
                        category: sample.category.clone(),
                        relative_path: sample.relative_path.clone(),
                    });
            }
            Err(e) => {
                println!("警告: 无法解析EPUB文件 {}: {}", sample.path.display(), e);
            }
        }
    }

    for entries in catalog.values_mut() {
        // 稳定排序：时间相同的条目保持扫描顺序
        entries.sort_by_key(|entry| modified_sort_key(entry.metadata.modified.as_deref()));
    }

    catalog
}

/// 未注明日期条目的哨兵日期，保证其排在所有有日期的条目之后
fn undated_sentinel() -> NaiveDateTime {
    NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MAX)
}

/// 计算条目的排序键
fn modified_sort_key(modified: Option<&str>) -> NaiveDateTime {
    modified
        .and_then(parse_timestamp)
        .unwrap_or_else(undated_sentinel)
}

/// 解析修改时间戳
///
/// 支持RFC 3339完整时间戳和纯日期两种形式，其余格式视为无法解析。
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
