use axum::{extract::State, response::Response};
use http::{HeaderMap, HeaderName, HeaderValue, header};
use std::sync::Arc;

/// 追加到每个响应上的额外头部
///
/// 默认策略只包含 `Access-Control-Allow-Origin: *`。通配来源且不限制方法和凭据，
/// 仅适用于本地开发，不应当作经过安全评审的配置用于其他场景。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPolicy {
    extra: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderPolicy {
    /// 创建不追加任何头部的策略
    pub fn empty() -> Self {
        Self { extra: Vec::new() }
    }

    /// 允许任意来源的跨域访问
    pub fn allow_any_origin() -> Self {
        Self::empty().with_header(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        )
    }

    /// 追加一个头部，按调用顺序写入响应
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra.push((name, value));
        self
    }

    /// 把策略中的头部追加到已有头部之后。
    ///
    /// 相同名称和值的头部已经存在时不会重复追加。
    ///
    /// # 参数
    ///
    /// * `headers` - 服务器已计算好的默认头部
    ///
    /// # 返回值
    ///
    /// 追加后的头部映射
    pub fn apply(&self, mut headers: HeaderMap) -> HeaderMap {
        for (name, value) in &self.extra {
            let present = headers.get_all(name).iter().any(|existing| existing == value);
            if !present {
                headers.append(name.clone(), value.clone());
            }
        }
        headers
    }
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self::allow_any_origin()
    }
}

/// 在响应发出前应用 [`HeaderPolicy`]，对所有状态码生效
pub async fn inject_headers(
    State(policy): State<Arc<HeaderPolicy>>,
    mut response: Response,
) -> Response {
    let headers = std::mem::take(response.headers_mut());
    *response.headers_mut() = policy.apply(headers);
    response
}
