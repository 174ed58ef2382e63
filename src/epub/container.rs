use crate::epub::error::{EpubError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Container.xml中的rootfile信息
#[derive(Debug, Clone)]
pub struct RootFile {
    pub full_path: String,
    pub media_type: Option<String>,
}

/// Container.xml的解析结果
#[derive(Debug, Clone)]
pub struct Container {
    pub rootfiles: Vec<RootFile>,
}

impl Container {
    /// 解析container.xml内容
    ///
    /// # 参数
    /// * `xml_content` - container.xml的文件内容
    ///
    /// # 返回值
    /// * `Result<Container>` - 解析后的Container信息；没有任何带full-path
    ///   属性的rootfile元素时返回 `EpubError::MissingRootfile`
    pub fn parse_xml(xml_content: &str) -> Result<Container> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut rootfiles = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if e.local_name().as_ref() == b"rootfile" {
                        let mut full_path = String::new();
                        let mut media_type = None;

                        for attr_result in e.attributes() {
                            let attr = attr_result.map_err(|e| {
                                EpubError::XmlError(quick_xml::Error::InvalidAttr(e))
                            })?;
                            match attr.key.local_name().as_ref() {
                                b"full-path" => {
                                    full_path = String::from_utf8_lossy(&attr.value).to_string();
                                }
                                b"media-type" => {
                                    media_type =
                                        Some(String::from_utf8_lossy(&attr.value).to_string());
                                }
                                _ => {}
                            }
                        }

                        if !full_path.is_empty() {
                            rootfiles.push(RootFile {
                                full_path,
                                media_type,
                            });
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if rootfiles.is_empty() {
            return Err(EpubError::MissingRootfile);
        }

        Ok(Container { rootfiles })
    }

    /// 获取OPF包文件的路径
    ///
    /// 按照开放容器协议取第一个rootfile声明的full-path属性。
    ///
    /// # 返回值
    /// * `Option<&str>` - OPF文件的完整路径；rootfile列表为空时返回None
    pub fn opf_path(&self) -> Option<&str> {
        self.rootfiles.first().map(|rootfile| rootfile.full_path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container_xml() {
        let container_xml = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
        <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
    </rootfiles>
</container>"#;

        let container = Container::parse_xml(container_xml).unwrap();
        assert_eq!(container.rootfiles.len(), 1);
        assert_eq!(container.opf_path(), Some("OEBPS/content.opf"));
        assert_eq!(
            container.rootfiles[0].media_type.as_deref(),
            Some("application/oebps-package+xml")
        );
    }

    #[test]
    fn test_parse_container_takes_first_rootfile() {
        let container_xml = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
        <rootfile full-path="EPUB/package.opf" media-type="application/oebps-package+xml"/>
        <rootfile full-path="EPUB/other.opf" media-type="application/oebps-package+xml"/>
    </rootfiles>
</container>"#;

        let container = Container::parse_xml(container_xml).unwrap();
        assert_eq!(container.rootfiles.len(), 2);
        assert_eq!(container.opf_path(), Some("EPUB/package.opf"));
    }

    #[test]
    fn test_opf_path_on_empty_rootfiles() {
        let container = Container { rootfiles: vec![] };
        assert_eq!(container.opf_path(), None);
    }

    #[test]
    fn test_parse_container_without_rootfile() {
        let container_xml = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
    </rootfiles>
</container>"#;

        let result = Container::parse_xml(container_xml);
        assert!(matches!(result, Err(EpubError::MissingRootfile)));
    }

    #[test]
    fn test_parse_container_ignores_rootfile_without_path() {
        let container_xml = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
        <rootfile media-type="application/oebps-package+xml"/>
    </rootfiles>
</container>"#;

        let result = Container::parse_xml(container_xml);
        assert!(matches!(result, Err(EpubError::MissingRootfile)));
    }
}
