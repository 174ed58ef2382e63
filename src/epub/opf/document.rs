//! OPF文档访问模块
//!
//! 将OPF包文件解析为扁平的元素快照，对外暴露"按(命名空间, 本地名)查找元素"
//! 和"按名称查找属性"两种查询，元数据提取逻辑不直接依赖任何树遍历API。

use crate::epub::error::{EpubError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use std::collections::HashMap;

/// Dublin Core元素的命名空间URI
///
/// OPF中的前缀是任意的，查找必须按命名空间URI精确匹配。
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// OPF文档中的单个元素快照
#[derive(Debug, Clone)]
pub struct OpfElement {
    /// 元素绑定的命名空间URI（无命名空间时为None）
    pub namespace: Option<String>,
    /// 去掉前缀的本地名称
    pub local_name: String,
    /// 属性映射（按本地名）
    pub attributes: HashMap<String, String>,
    /// 元素的文本内容
    pub text: String,
}

impl OpfElement {
    /// 按本地名获取属性值
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// 获取去除首尾空白后的文本内容
    ///
    /// 空文本视为缺失，返回None。
    pub fn content(&self) -> Option<&str> {
        let content = self.text.trim();
        if content.is_empty() {
            None
        } else {
            Some(content)
        }
    }
}

/// 解析过程中尚未闭合的元素
struct OpenElement {
    namespace: Option<String>,
    local_name: String,
    attributes: HashMap<String, String>,
    text: String,
}

/// OPF文档的只读元素快照
///
/// 构造后不再修改，所有查询都是纯读取。
#[derive(Debug, Clone)]
pub struct OpfDocument {
    /// package根元素声明的unique-identifier属性
    unique_identifier: Option<String>,
    elements: Vec<OpfElement>,
}

impl OpfDocument {
    /// 解析OPF文件内容为元素快照
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    ///
    /// # 返回值
    /// * `Result<OpfDocument>` - 解析后的文档快照
    pub fn parse_xml(xml_content: &str) -> Result<OpfDocument> {
        let mut reader = NsReader::from_str(xml_content);
        reader.config_mut().trim_text(true);

        let mut unique_identifier = None;
        let mut elements = Vec::new();
        let mut stack: Vec<OpenElement> = Vec::new();

        loop {
            match reader.read_resolved_event()? {
                (resolution, Event::Start(ref e)) => {
                    let open = Self::open_element(&resolution, e)?;

                    if open.local_name == "package" && unique_identifier.is_none() {
                        unique_identifier = open.attributes.get("unique-identifier").cloned();
                    }

                    stack.push(open);
                }
                (resolution, Event::Empty(ref e)) => {
                    let open = Self::open_element(&resolution, e)?;
                    elements.push(OpfElement {
                        namespace: open.namespace,
                        local_name: open.local_name,
                        attributes: open.attributes,
                        text: String::new(),
                    });
                }
                (_, Event::Text(e)) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&e.unescape()?);
                    }
                }
                (_, Event::End(_)) => {
                    // 同级元素按闭合顺序入列，保持文档顺序
                    if let Some(open) = stack.pop() {
                        elements.push(OpfElement {
                            namespace: open.namespace,
                            local_name: open.local_name,
                            attributes: open.attributes,
                            text: open.text,
                        });
                    }
                }
                (_, Event::Eof) => break,
                _ => {}
            }
        }

        Ok(OpfDocument {
            unique_identifier,
            elements,
        })
    }

    /// 读取元素的命名空间和属性
    fn open_element(resolution: &ResolveResult, e: &BytesStart) -> Result<OpenElement> {
        let namespace = match resolution {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.0).to_string()),
            _ => None,
        };

        let local_name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

        let mut attributes = HashMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|e| EpubError::XmlError(quick_xml::Error::InvalidAttr(e)))?;
            attributes.insert(
                String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string(),
                String::from_utf8_lossy(&attr.value).to_string(),
            );
        }

        Ok(OpenElement {
            namespace,
            local_name,
            attributes,
            text: String::new(),
        })
    }

    /// 获取package根元素的unique-identifier属性
    pub fn unique_identifier(&self) -> Option<&str> {
        self.unique_identifier.as_deref()
    }

    /// 按(命名空间URI, 本地名)查找所有匹配元素，保持文档顺序
    pub fn elements_in<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a OpfElement> {
        self.elements.iter().filter(move |element| {
            element.local_name == local_name && element.namespace.as_deref() == Some(namespace)
        })
    }

    /// 按本地名查找所有匹配元素（不限定命名空间）
    pub fn elements_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a OpfElement> {
        self.elements
            .iter()
            .filter(move |element| element.local_name == local_name)
    }

    /// 获取第一个匹配元素的文本内容
    pub fn first_text_in(&self, namespace: &str, local_name: &str) -> Option<String> {
        self.elements_in(namespace, local_name)
            .find_map(|element| element.content().map(str::to_string))
    }

    /// 获取所有匹配元素的文本内容，保持文档顺序
    pub fn all_texts_in(&self, namespace: &str, local_name: &str) -> Vec<String> {
        self.elements_in(namespace, local_name)
            .filter_map(|element| element.content().map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="3.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
        <dc:title>测试书籍</dc:title>
        <dc:creator>作者一</dc:creator>
        <dc:creator>作者二</dc:creator>
        <dc:identifier id="BookId">urn:uuid:123</dc:identifier>
        <meta property="dcterms:modified">2021-01-01T00:00:00Z</meta>
    </metadata>
</package>"#;

    #[test]
    fn test_unique_identifier() {
        let document = OpfDocument::parse_xml(SAMPLE_OPF).unwrap();
        assert_eq!(document.unique_identifier(), Some("BookId"));
    }

    #[test]
    fn test_namespace_qualified_lookup() {
        let document = OpfDocument::parse_xml(SAMPLE_OPF).unwrap();
        assert_eq!(
            document.first_text_in(DC_NAMESPACE, "title"),
            Some("测试书籍".to_string())
        );
    }

    #[test]
    fn test_lookup_preserves_document_order() {
        let document = OpfDocument::parse_xml(SAMPLE_OPF).unwrap();
        let creators = document.all_texts_in(DC_NAMESPACE, "creator");
        assert_eq!(creators, vec!["作者一".to_string(), "作者二".to_string()]);
    }

    #[test]
    fn test_plain_tag_name_is_not_dublin_core() {
        // title元素绑定在OPF命名空间下，不应被当作Dublin Core元素
        let xml = r#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
    <metadata>
        <title>不是DC标题</title>
    </metadata>
</package>"#;

        let document = OpfDocument::parse_xml(xml).unwrap();
        assert_eq!(document.first_text_in(DC_NAMESPACE, "title"), None);
    }

    #[test]
    fn test_meta_property_lookup() {
        let document = OpfDocument::parse_xml(SAMPLE_OPF).unwrap();
        let modified = document
            .elements_named("meta")
            .find(|e| e.attribute("property") == Some("dcterms:modified"))
            .and_then(|e| e.content());
        assert_eq!(modified, Some("2021-01-01T00:00:00Z"));
    }

    #[test]
    fn test_empty_text_is_absent() {
        let xml = r#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
        <dc:description>   </dc:description>
    </metadata>
</package>"#;

        let document = OpfDocument::parse_xml(xml).unwrap();
        assert_eq!(document.first_text_in(DC_NAMESPACE, "description"), None);
    }
}
