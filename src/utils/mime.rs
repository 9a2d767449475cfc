//! 扩展名到 Content-Type 的映射表。

use super::path::{decode_request_path, get_extension_lowercase};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use std::borrow::Cow;
use std::sync::Arc;

/// ES 模块要求的 JavaScript 类型
pub const TEXT_JAVASCRIPT: &str = "text/javascript";

/// 无法识别扩展名时使用的类型
pub const OCTET_STREAM: &str = "application/octet-stream";

/// MIME 类型覆盖表
///
/// 按注册顺序保存 `(扩展名, Content-Type)`，同一扩展名后注册的覆盖先注册的，
/// 也覆盖 `mime_guess` 的内置结果。在启动时构建，之后只读共享。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeRegistry {
    overrides: Vec<(String, String)>,
}

impl MimeRegistry {
    /// 创建不含任何覆盖项的映射表
    pub fn empty() -> Self {
        Self {
            overrides: Vec::new(),
        }
    }

    /// 注册一个扩展名的 Content-Type。
    ///
    /// 扩展名可以带或不带前导点，大小写不敏感。已存在的扩展名会被静默覆盖。
    ///
    /// # 参数
    ///
    /// * `extension` - 文件扩展名，例如 `.mjs`
    /// * `content_type` - 响应中使用的 Content-Type
    pub fn register(&mut self, extension: &str, content_type: &str) {
        let key = normalize_extension(extension);
        self.overrides.retain(|(existing, _)| *existing != key);
        self.overrides.push((key, content_type.to_string()));
    }

    /// 链式版本的 [`MimeRegistry::register`]
    pub fn with(mut self, extension: &str, content_type: &str) -> Self {
        self.register(extension, content_type);
        self
    }

    /// 按注册顺序遍历覆盖项
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(ext, content_type)| (ext.as_str(), content_type.as_str()))
    }

    /// 查找路径扩展名对应的覆盖项，没有覆盖时返回 `None`。
    ///
    /// 以 `/` 结尾的路径指向目录，即使目录名带扩展名也不匹配。
    pub fn lookup(&self, path: &str) -> Option<&str> {
        if path.ends_with('/') {
            return None;
        }
        let ext = get_extension_lowercase(path);
        if ext.is_empty() {
            return None;
        }
        let key = format!(".{ext}");
        self.overrides
            .iter()
            .rev()
            .find(|(existing, _)| *existing == key)
            .map(|(_, content_type)| content_type.as_str())
    }

    /// 计算路径的 Content-Type：优先覆盖项，其次 `mime_guess`，最后 `application/octet-stream`
    pub fn content_type(&self, path: &str) -> Cow<'_, str> {
        match self.lookup(path) {
            Some(content_type) => Cow::Borrowed(content_type),
            None => match mime_guess::from_path(path).first_raw() {
                Some(guessed) => Cow::Borrowed(guessed),
                None => Cow::Borrowed(OCTET_STREAM),
            },
        }
    }
}

impl Default for MimeRegistry {
    /// `.js` 与 `.mjs` 均映射为 `text/javascript`
    fn default() -> Self {
        Self::empty()
            .with(".js", TEXT_JAVASCRIPT)
            .with(".mjs", TEXT_JAVASCRIPT)
    }
}

/// 统一扩展名格式：去除空白、补全前导点并转换为小写
fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_ascii_lowercase())
}

/// 按 [`MimeRegistry::content_type`] 设置成功响应的 Content-Type 的中间件。
///
/// 只处理 2xx 响应，错误页面保留原有头部。以 `/` 结尾的请求路径由目录的
/// `index.html` 或目录列表响应，保留它们自己的类型。
pub async fn apply_content_type(
    State(registry): State<Arc<MimeRegistry>>,
    req: Request,
    next: Next,
) -> Response {
    let path = decode_request_path(req.uri().path());
    let content_type = if path.ends_with('/') {
        None
    } else {
        Some(registry.content_type(&path).into_owned())
    };

    let mut response = next.run(req).await;

    if let Some(content_type) = content_type {
        if response.status().is_success() {
            match HeaderValue::from_str(&content_type) {
                Ok(value) => {
                    response.headers_mut().insert(header::CONTENT_TYPE, value);
                }
                Err(e) => {
                    tracing::warn!("忽略无效的 Content-Type {:?}: {}", content_type, e);
                }
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_serves_javascript_modules() {
        let registry = MimeRegistry::default();

        assert_eq!(registry.lookup("/app.js"), Some(TEXT_JAVASCRIPT));
        assert_eq!(registry.lookup("/js/modules/audio.mjs"), Some(TEXT_JAVASCRIPT));
        assert_eq!(registry.lookup("/APP.JS"), Some(TEXT_JAVASCRIPT));
        assert_eq!(registry.lookup("/index.html"), None);
        assert_eq!(registry.lookup("/js/"), None);
    }

    #[test]
    fn test_later_registration_wins() {
        let mut registry = MimeRegistry::default();
        registry.register("js", "application/x-custom");

        assert_eq!(registry.lookup("/main.js"), Some("application/x-custom"));
        // 覆盖后仍只保留一项
        assert_eq!(
            registry.overrides().collect::<Vec<_>>(),
            vec![(".mjs", TEXT_JAVASCRIPT), (".js", "application/x-custom")]
        );
    }

    #[test]
    fn test_extension_normalization() {
        let registry = MimeRegistry::empty()
            .with("WASM", "application/wasm")
            .with("  .Map ", "application/json");

        assert_eq!(registry.lookup("/pkg/app.wasm"), Some("application/wasm"));
        assert_eq!(registry.lookup("/main.js.map"), Some("application/json"));
    }

    #[test]
    fn test_content_type_falls_back_to_mime_guess() {
        let registry = MimeRegistry::default();

        assert_eq!(registry.content_type("/app.mjs"), TEXT_JAVASCRIPT);
        assert_eq!(registry.content_type("/index.html"), "text/html");
        assert_eq!(registry.content_type("/style.css"), "text/css");
        assert_eq!(registry.content_type("/blob.unknownext"), OCTET_STREAM);
    }

    #[test]
    fn test_directory_paths_never_match() {
        let registry = MimeRegistry::default();

        assert_eq!(registry.lookup("/lib.js/"), None);
        assert_eq!(registry.lookup("/pkg.mjs/"), None);
        assert_eq!(registry.lookup("/lib.js"), Some(TEXT_JAVASCRIPT));
    }

    #[test]
    fn test_empty_registry_has_no_overrides() {
        let registry = MimeRegistry::empty();

        assert_eq!(registry.lookup("/app.js"), None);
        assert_eq!(registry.overrides().count(), 0);
    }
}
