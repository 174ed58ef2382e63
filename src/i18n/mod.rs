pub mod error;
pub mod po;
pub mod convert;
pub mod table;
pub mod pot;

// 重新导出错误处理
pub use error::{I18nError, Result};

// 重新导出PO解析
pub use po::{classify_line, parse_po, PoLine};

// 重新导出转换
pub use convert::{convert_all, to_json_string};

// 重新导出翻译表
pub use table::{LocaleConfig, LocaleTable};

// 重新导出POT更新
pub use pot::{extract_template_keys, update_pot_file, PotMessage};
