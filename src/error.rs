use std::net::SocketAddr;
use thiserror::Error;

/// 服务器启动与运行期间的错误
#[derive(Debug, Error)]
pub enum ServerError {
    /// 无法确定当前工作目录
    #[error("failed to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// 端口已被占用或没有权限监听
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// 监听循环异常退出
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
