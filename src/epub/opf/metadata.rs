//! 包元数据提取模块
//!
//! 从OPF文档快照中提取Dublin Core元数据和修改时间戳。
//! 所有字段的查找都是尽力而为：找不到即为缺失，不会产生错误。

use crate::epub::opf::document::{OpfDocument, DC_NAMESPACE};
use serde::Serialize;

/// EPUB包的元数据
///
/// 可选字段在文档中不存在时为None，绝不使用空字符串占位。
/// 构造后为只读快照。
#[derive(Debug, Clone, Serialize)]
pub struct PackageMetadata {
    /// 唯一标识符：id属性与package根元素unique-identifier一致的identifier元素的文本
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// 标题（第一个title元素）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 所有创建者，按文档顺序
    pub authors: Vec<String>,
    /// 描述（第一个description元素）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 语言（第一个language元素）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 出版社（第一个publisher元素）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// 所有主题，按文档顺序
    pub subjects: Vec<String>,
    /// 修改时间戳（property为dcterms:modified的meta元素的文本）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// 来源文件路径
    pub source_path: String,
}

impl PackageMetadata {
    /// 从OPF文档快照中提取元数据
    ///
    /// # 参数
    /// * `document` - 已解析的OPF文档快照
    /// * `source_path` - 来源EPUB文件路径（仅用于记录）
    ///
    /// # 返回值
    /// * `PackageMetadata` - 提取出的元数据，缺失字段为None
    pub fn from_document(document: &OpfDocument, source_path: &str) -> PackageMetadata {
        let uuid = document.unique_identifier().and_then(|uid| {
            document
                .elements_in(DC_NAMESPACE, "identifier")
                .find(|element| element.attribute("id") == Some(uid))
                .and_then(|element| element.content().map(str::to_string))
        });

        let modified = document
            .elements_named("meta")
            .find(|element| element.attribute("property") == Some("dcterms:modified"))
            .and_then(|element| element.content().map(str::to_string));

        PackageMetadata {
            uuid,
            title: document.first_text_in(DC_NAMESPACE, "title"),
            authors: document.all_texts_in(DC_NAMESPACE, "creator"),
            description: document.first_text_in(DC_NAMESPACE, "description"),
            language: document.first_text_in(DC_NAMESPACE, "language"),
            publisher: document.first_text_in(DC_NAMESPACE, "publisher"),
            subjects: document.all_texts_in(DC_NAMESPACE, "subject"),
            modified,
            source_path: source_path.to_string(),
        }
    }
}
