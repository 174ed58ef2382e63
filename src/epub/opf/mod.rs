//! OPF（Open Packaging Format）文件解析模块
//!
//! 此模块提供EPUB包文件的命名空间感知解析，以及Dublin Core元数据的提取。

mod document;
mod metadata;

// 重新导出公共类型以保持API兼容性
pub use document::{OpfDocument, OpfElement, DC_NAMESPACE};
pub use metadata::PackageMetadata;
