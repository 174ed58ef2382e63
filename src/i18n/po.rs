//! PO文件解析模块
//!
//! 提供gettext PO格式的逐行解析：显式的行分类器配合一个小型状态机，
//! 不使用正则扫描，语法行为可直接审计。

use std::collections::BTreeMap;

/// PO文件中单行的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoLine<'a> {
    /// 空行
    Blank,
    /// #开头的注释行
    Comment,
    /// msgid关键字行，携带去引号后的键
    Msgid(&'a str),
    /// msgstr关键字行，携带去引号后的文本
    Msgstr(&'a str),
    /// 裸引号字符串续行，携带引号内的内容
    Continuation(&'a str),
    /// 无法识别的行
    Other,
}

/// 解析器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InMsgid,
    InMsgstr,
}

/// 对单行进行分类
///
/// 行首尾空白会先被去除；关键字后的字符串字面量只去掉两端各一个引号。
pub fn classify_line(line: &str) -> PoLine<'_> {
    let line = line.trim();

    if line.is_empty() {
        return PoLine::Blank;
    }
    if line.starts_with('#') {
        return PoLine::Comment;
    }
    if let Some(rest) = line.strip_prefix("msgid ") {
        return PoLine::Msgid(unquote(rest));
    }
    if let Some(rest) = line.strip_prefix("msgstr ") {
        return PoLine::Msgstr(unquote(rest));
    }
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        return PoLine::Continuation(&line[1..line.len() - 1]);
    }

    PoLine::Other
}

/// 去掉字符串字面量两端各一个引号
///
/// 注意：不解码反斜杠转义序列（\n、\"等），续行内容按字面拼接，
/// 与现有翻译数据的字面行为保持一致。
fn unquote(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// 解析PO文件内容为键到译文的映射
///
/// 规则：
/// - 注释行和空行被忽略，不改变状态
/// - 新的msgid行会提交之前待定的(msgid, msgstr)对，译文为空的对被丢弃
/// - 同一个键出现多次时，后出现的覆盖先出现的
/// - 续行按字面追加到当前活跃的msgid或msgstr
///
/// # 参数
/// * `content` - PO文件的文本内容
///
/// # 返回值
/// * `BTreeMap<String, String>` - 键到译文的映射，空译文不会出现
pub fn parse_po(content: &str) -> BTreeMap<String, String> {
    let mut translations = BTreeMap::new();
    let mut state = State::Idle;
    let mut msgid = String::new();
    let mut msgstr: Option<String> = None;

    for raw_line in content.lines() {
        match classify_line(raw_line) {
            PoLine::Blank | PoLine::Comment | PoLine::Other => {}
            PoLine::Msgid(value) => {
                commit(&mut translations, &msgid, msgstr.as_deref());
                msgid = value.to_string();
                msgstr = None;
                state = State::InMsgid;
            }
            PoLine::Msgstr(value) => {
                msgstr = Some(value.to_string());
                state = State::InMsgstr;
            }
            PoLine::Continuation(value) => match state {
                State::InMsgid => msgid.push_str(value),
                State::InMsgstr => {
                    if let Some(pending) = msgstr.as_mut() {
                        pending.push_str(value);
                    }
                }
                State::Idle => {}
            },
        }
    }

    // 文件末尾可能没有后续msgid，最后一对在这里提交
    commit(&mut translations, &msgid, msgstr.as_deref());

    translations
}

/// 提交一个待定的(msgid, msgstr)对
///
/// 键或译文为空时不存储。
fn commit(translations: &mut BTreeMap<String, String>, msgid: &str, msgstr: Option<&str>) {
    if let Some(text) = msgstr {
        if !msgid.is_empty() && !text.is_empty() {
            translations.insert(msgid.to_string(), text.to_string());
        }
    }
}
