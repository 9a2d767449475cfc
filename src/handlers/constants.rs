use percent_encoding::{AsciiSet, CONTROLS};

/// 文件不存在时的响应正文
pub const NOT_FOUND_BODY: &str = "File not found";

/// 目录无法读取时的响应正文
pub const UNREADABLE_DIR_BODY: &str = "No permission to list directory";

/// 目录列表中链接需要转义的字符
///
/// 在控制字符之外转义空格、引号、尖括号以及在 URL 中有特殊含义的字符。
pub const LINK_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');
