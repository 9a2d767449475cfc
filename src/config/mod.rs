//! 静态文件服务器的配置模块。
//!
//! 监听地址固定为 `0.0.0.0:8000`，不读取命令行参数或环境变量；
//! 服务根目录默认为当前工作目录。

use crate::error::ServerError;
use crate::utils::headers::HeaderPolicy;
use crate::utils::mime::MimeRegistry;
use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// 固定的监听端口
pub const PORT: u16 = 8000;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听地址
    pub addr: SocketAddr,
    /// 服务根目录
    pub root: PathBuf,
    /// Content-Type 覆盖表
    pub mime: MimeRegistry,
    /// 每个响应追加的头部
    pub headers: HeaderPolicy,
}

impl ServerConfig {
    /// 使用默认监听地址、MIME 覆盖和 CORS 策略创建配置。
    ///
    /// # 参数
    ///
    /// * `root` - 服务根目录
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT)),
            root: root.into(),
            mime: MimeRegistry::default(),
            headers: HeaderPolicy::default(),
        }
    }

    /// 以当前工作目录为根目录创建配置
    pub fn from_current_dir() -> Result<Self, ServerError> {
        let root = env::current_dir().map_err(ServerError::CurrentDir)?;
        Ok(Self::new(root))
    }

    /// 启动时打印的访问地址
    pub fn public_url(&self) -> String {
        format!("http://localhost:{}/", self.addr.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::new("/srv/site");

        assert_eq!(config.addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.root, PathBuf::from("/srv/site"));
        assert_eq!(config.mime, MimeRegistry::default());
        assert_eq!(config.headers, HeaderPolicy::default());
        assert_eq!(config.public_url(), "http://localhost:8000/");
    }

    #[test]
    fn test_from_current_dir() {
        let config = ServerConfig::from_current_dir().unwrap();

        assert_eq!(config.root, env::current_dir().unwrap());
    }
}
