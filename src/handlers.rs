//! HTTP请求处理模块
//!
//! 静态文件本身由 `ServeDir` 处理，这里只包含它的回退处理器：
//! - 目录列表处理器

pub mod constants;
pub mod listing;

// 重新导出主要的公共接口
pub use listing::handle_listing;
