use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// EPUB相关的错误类型
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("无效的ZIP容器: {0}")]
    InvalidArchive(zip::result::ZipError),

    #[error("容器中未找到条目: {0}")]
    EntryNotFound(String),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("container.xml中没有找到任何rootfile条目")]
    MissingRootfile,

    #[error("OPF文件解析错误: {0}")]
    OpfParseError(String),
}
