pub mod epub;
pub mod catalog;
pub mod i18n;

// === 核心API重新导出 ===

/// EPUB元数据提取（主要接口）
pub use epub::extract_metadata;

/// 错误处理
pub use epub::{EpubError, Result};
pub use i18n::I18nError;

// === 数据结构 ===

/// EPUB包元数据
pub use epub::PackageMetadata;

/// 目录构建
pub use catalog::{build_catalog, scan_samples, Catalog, CatalogEntry, SampleFile, SampleListing};

/// 多语言翻译表
pub use i18n::{LocaleConfig, LocaleTable};

// === 底层组件（高级用法） ===

/// 容器组件
pub use epub::{Container, EpubArchive, RootFile};

/// OPF组件
pub use epub::{OpfDocument, OpfElement, DC_NAMESPACE};

// === 库信息 ===

/// SiteForge库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SiteForge库的描述
pub const DESCRIPTION: &str = "一个用于静态网站内容管道的Rust库";

/// 库的主页
pub const HOMEPAGE: &str = "https://github.com/FWW321/siteforge";

// === 便捷函数 ===

/// 扫描样例目录并构建完整目录
///
/// 这是 `catalog::scan_samples` 加 `catalog::build_catalog` 的便捷包装函数。
///
/// # 参数
/// * `samples_root` - 样例根目录路径
///
/// # 返回值
/// * `Result<Catalog>` - 按分类分组、按修改时间排序的目录
///
/// # 示例
///
/// ```no_run
/// use siteforge;
///
/// let catalog = siteforge::build_catalog_from_dir("content/samples")?;
/// for (category, entries) in &catalog {
///     println!("{}: {} 个样例", category, entries.len());
/// }
/// # Ok::<(), siteforge::EpubError>(())
/// ```
pub fn build_catalog_from_dir<P: AsRef<std::path::Path>>(samples_root: P) -> Result<Catalog> {
    let listing = scan_samples(samples_root)?;
    Ok(build_catalog(&listing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        println!("SiteForge version: {}", VERSION);
    }

    #[test]
    fn test_description() {
        assert!(!DESCRIPTION.is_empty());
        println!("Description: {}", DESCRIPTION);
    }

    #[test]
    fn test_homepage() {
        assert!(!HOMEPAGE.is_empty());
        println!("Homepage: {}", HOMEPAGE);
    }
}
