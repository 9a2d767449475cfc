//! 本地开发用静态文件服务器库
//!
//! 这是一个基于Axum的静态文件服务器，主要功能包括：
//! - 从当前目录服务静态文件，目录没有 `index.html` 时返回目录列表
//! - 将 `.js` 与 `.mjs` 的 Content-Type 固定为 `text/javascript`，满足 ES 模块加载
//! - 为每个响应追加 `Access-Control-Allow-Origin: *`

pub mod config;
pub mod error;
pub mod handlers;
pub mod utils;

pub use config::ServerConfig;
pub use error::ServerError;

use axum::handler::Handler;
use axum::middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;
use utils::headers::inject_headers;
use utils::mime::apply_content_type;

/// 未设置 `RUST_LOG` 时的日志过滤规则
const DEFAULT_LOG_FILTER: &str = "module_server=info,tower_http=info";

/// 创建并配置Axum应用程序
///
/// 此函数组装了完整的请求处理链，由内到外依次为：
/// - `ServeDir` 静态文件服务，找不到文件时回退到目录列表
/// - Content-Type 中间件，类型由 `MimeRegistry` 决定
/// - 响应头策略，对所有状态码生效
/// - 请求追踪中间件
///
/// # Returns
///
/// 返回配置好的Axum Router实例
pub fn app(config: &ServerConfig) -> axum::Router {
    let root = Arc::new(config.root.clone());
    let mime = Arc::new(config.mime.clone());
    let headers = Arc::new(config.headers.clone());

    let serve_dir =
        ServeDir::new(config.root.as_path()).fallback(handlers::handle_listing.with_state(root));

    axum::Router::new()
        .fallback_service(serve_dir)
        .layer(middleware::from_fn_with_state(mime, apply_content_type))
        .layer(middleware::map_response_with_state(headers, inject_headers))
        .layer(TraceLayer::new_for_http())
}

/// 监听指定地址，失败时不重试也不换端口
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// 启动服务器并一直运行到收到中断信号。
///
/// 中断后直接丢弃监听循环和未完成的连接，返回 `Ok(())`。
///
/// # Errors
///
/// 端口被占用时返回 [`ServerError::Bind`]，监听循环异常退出时返回 [`ServerError::Serve`]。
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let listener = bind(config.addr).await?;

    println!("Server running at {}", config.public_url());
    println!("Press Ctrl+C to stop");
    tracing::info!(
        addr = %config.addr,
        root = %config.root.display(),
        "静态文件服务器已启动"
    );
    for (extension, content_type) in config.mime.overrides() {
        tracing::info!("Content-Type 覆盖: {} -> {}", extension, content_type);
    }

    let router = app(&config);

    tokio::select! {
        result = axum::serve(listener, router).into_future() => result.map_err(ServerError::Serve),
        () = shutdown_signal() => {
            tracing::info!("收到中断信号，服务器停止");
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("无法监听中断信号: {}", e);
        std::future::pending::<()>().await;
    }
}

/// 初始化日志，`RUST_LOG` 优先于默认过滤规则
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::rfc_3339())
        .init();
}
