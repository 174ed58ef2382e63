pub mod error;
pub mod archive;
pub mod container;
pub mod opf;

// 重新导出错误处理
pub use error::{EpubError, Result};

// 重新导出容器相关
pub use archive::EpubArchive;
pub use container::{Container, RootFile};

// 重新导出OPF相关
pub use opf::{OpfDocument, OpfElement, PackageMetadata, DC_NAMESPACE};

use std::path::Path;

/// 从EPUB文件中提取包元数据
///
/// 两阶段解析，对应EPUB开放容器协议：
/// 1. 解析META-INF/container.xml，定位OPF包文件路径
/// 2. 解析OPF文件，按命名空间提取Dublin Core元数据和修改时间戳
///
/// 容器句柄在本次调用内打开、读取并释放。
///
/// # 参数
/// * `path` - EPUB文件路径
///
/// # 返回值
/// * `Result<PackageMetadata>` - 提取出的元数据
///
/// # 示例
///
/// ```no_run
/// use siteforge::epub;
///
/// let metadata = epub::extract_metadata("book.epub")?;
/// println!("标题: {:?}", metadata.title);
/// # Ok::<(), siteforge::EpubError>(())
/// ```
pub fn extract_metadata<P: AsRef<Path>>(path: P) -> Result<PackageMetadata> {
    let source_path = path.as_ref().to_string_lossy().to_string();

    let mut archive = EpubArchive::open(path)?;
    let container_xml = archive.read_string("META-INF/container.xml")?;
    let container = Container::parse_xml(&container_xml)?;

    let opf_path = container.opf_path().ok_or(EpubError::MissingRootfile)?;
    let opf_xml = archive.read_string(opf_path)?;
    let document = OpfDocument::parse_xml(&opf_xml)?;

    Ok(PackageMetadata::from_document(&document, &source_path))
}
