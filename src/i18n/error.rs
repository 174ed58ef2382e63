use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, I18nError>;

/// 翻译处理相关的错误类型
#[derive(Error, Debug)]
pub enum I18nError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("JSON处理错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("缺少语言源文件 {language}: {path}")]
    MissingLanguageSource { language: String, path: String },

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}
