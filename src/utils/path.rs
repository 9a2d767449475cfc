use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// 从文件路径或文件名中获取扩展名，并转换为小写
///
/// # 参数
///
/// * `path` - 文件路径或文件名
///
/// # 返回值
///
/// 返回小写的文件扩展名字符串，如果没有扩展名则返回空字符串
///
/// # 示例
///
/// ```
/// use module_server::utils::path::get_extension_lowercase;
///
/// assert_eq!(get_extension_lowercase("app.MJS"), "mjs");
/// assert_eq!(get_extension_lowercase("js/modules/audio.js"), "js");
/// assert_eq!(get_extension_lowercase("noext"), "");
/// assert_eq!(get_extension_lowercase(".hidden"), "");
/// ```
pub fn get_extension_lowercase(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

/// 对请求路径做百分号解码，非法 UTF-8 序列按替换字符处理
pub fn decode_request_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

/// 将请求路径映射到服务根目录下的文件系统路径。
///
/// 空段与 `.` 段被忽略；出现 `..`、盘符或根前缀时返回 `None`，
/// 因此结果永远不会越出 `root`。
///
/// # 参数
///
/// * `root` - 服务根目录
/// * `request_path` - URI 中的路径部分（未解码）
pub fn resolve_request_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = decode_request_path(request_path);
    let mut resolved = root.to_path_buf();

    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains('\\') {
            return None;
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => resolved.push(part),
            _ => return None,
        }
    }

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_extension_lowercase() {
        assert_eq!(get_extension_lowercase("/js/main.js"), "js");
        assert_eq!(get_extension_lowercase("/app.MJS"), "mjs");
        assert_eq!(get_extension_lowercase("/archive.tar.gz"), "gz");
        assert_eq!(get_extension_lowercase("/dir/"), "");
    }

    #[test]
    fn test_decode_request_path() {
        assert_eq!(decode_request_path("/my%20file.js"), "/my file.js");
        assert_eq!(decode_request_path("/app%2Emjs"), "/app.mjs");
        assert_eq!(decode_request_path("/plain"), "/plain");
    }

    #[test]
    fn test_resolve_request_path() {
        let root = Path::new("/srv/site");

        assert_eq!(resolve_request_path(root, "/"), Some(root.to_path_buf()));
        assert_eq!(
            resolve_request_path(root, "/js/modules/"),
            Some(root.join("js").join("modules"))
        );
        // 重复斜杠与 `.` 段被折叠
        assert_eq!(
            resolve_request_path(root, "//js/./main.js"),
            Some(root.join("js").join("main.js"))
        );
        assert_eq!(
            resolve_request_path(root, "/with%20space"),
            Some(root.join("with space"))
        );
    }

    #[test]
    fn test_resolve_request_path_rejects_traversal() {
        let root = Path::new("/srv/site");

        assert_eq!(resolve_request_path(root, "/../etc/passwd"), None);
        assert_eq!(resolve_request_path(root, "/js/%2E%2E/%2E%2E/secret"), None);
        assert_eq!(resolve_request_path(root, "/js\\..\\secret"), None);
    }
}
