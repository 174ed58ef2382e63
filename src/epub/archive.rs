//! 容器读取模块
//!
//! 提供对EPUB ZIP容器的按路径读取功能，不需要解压到临时目录。

use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use crate::epub::error::{EpubError, Result};

/// 表示一个已打开的EPUB容器
///
/// 句柄的生命周期限定在单次提取调用内，离开作用域时自动释放。
pub struct EpubArchive {
    archive: ZipArchive<File>,
}

impl EpubArchive {
    /// 打开EPUB容器文件
    ///
    /// # 参数
    /// * `path` - EPUB文件的路径
    ///
    /// # 返回值
    /// * `Result<EpubArchive>` - 成功返回容器实例；文件不是有效的ZIP格式时
    ///   返回 `EpubError::InvalidArchive`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<EpubArchive> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file).map_err(EpubError::InvalidArchive)?;

        Ok(EpubArchive { archive })
    }

    /// 按内部路径精确查找并读取条目的二进制内容
    ///
    /// # 参数
    /// * `entry_path` - 容器内部的条目路径（精确匹配）
    ///
    /// # 返回值
    /// * `Result<Vec<u8>>` - 条目内容；条目不存在时返回 `EpubError::EntryNotFound`
    pub fn read_bytes(&mut self, entry_path: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(entry_path).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => EpubError::EntryNotFound(entry_path.to_string()),
            other => EpubError::InvalidArchive(other),
        })?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// 按内部路径读取条目的文本内容
    ///
    /// # 参数
    /// * `entry_path` - 容器内部的条目路径（精确匹配）
    ///
    /// # 返回值
    /// * `Result<String>` - 条目的UTF-8文本内容
    pub fn read_string(&mut self, entry_path: &str) -> Result<String> {
        let bytes = self.read_bytes(entry_path)?;
        String::from_utf8(bytes)
            .map_err(|e| EpubError::OpfParseError(format!("条目不是有效的UTF-8文本: {}", e)))
    }
}
