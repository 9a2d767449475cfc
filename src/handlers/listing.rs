use super::constants::{LINK_ENCODE_SET, NOT_FOUND_BODY, UNREADABLE_DIR_BODY};
use crate::utils::path::{decode_request_path, resolve_request_path};
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use percent_encoding::utf8_percent_encode;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 目录中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// 文件名
    pub name: String,
    /// 指向目录（包括指向目录的符号链接）
    pub is_dir: bool,
    /// 本身是符号链接
    pub is_symlink: bool,
}

impl ListingEntry {
    /// 页面上显示的名称，目录加 `/`，符号链接加 `@`
    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// 链接地址，目录加 `/` 以避免一次重定向
    pub fn href(&self) -> String {
        let encoded = utf8_percent_encode(&self.name, LINK_ENCODE_SET).to_string();
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded
        }
    }
}

/// `ServeDir` 找不到文件时的回退处理器。
///
/// 请求路径指向没有 `index.html` 的目录时返回目录列表，否则返回 404。
///
/// # 参数
///
/// * `root` - 服务根目录
/// * `uri` - 请求 URI
pub async fn handle_listing(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let request_path = uri.path();

    let Some(dir) = resolve_request_path(&root, request_path) else {
        return not_found();
    };

    match tokio::fs::metadata(&dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => return not_found(),
    }

    let entries = read_entries(&dir).await;
    listing_response(&decode_request_path(request_path), entries)
}

/// 根据目录读取结果生成响应，读取失败时返回 404
fn listing_response(display_path: &str, entries: std::io::Result<Vec<ListingEntry>>) -> Response {
    match entries {
        Ok(entries) => {
            tracing::debug!("列出目录 {} ({} 项)", display_path, entries.len());
            Html(render_listing(display_path, &entries)).into_response()
        }
        Err(e) => {
            tracing::warn!("无法读取目录 {}: {}", display_path, e);
            (StatusCode::NOT_FOUND, UNREADABLE_DIR_BODY).into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// 读取目录内容并按名称排序（不区分大小写）
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry.file_type().await?.is_symlink();
        // 跟随符号链接判断目标类型，断开的链接按普通文件处理
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_cached_key(|entry| entry.name.to_lowercase());
    Ok(entries)
}

/// 渲染目录列表页面
///
/// # 参数
///
/// * `display_path` - 已解码的请求路径，用于标题
/// * `entries` - 已排序的目录项
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&entry.href()),
            escape_html(&entry.display_name())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
