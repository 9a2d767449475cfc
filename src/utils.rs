//! 工具函数模块
//!
//! 此模块包含了项目中使用的各种工具函数：
//! - HTTP头部处理工具（响应头追加策略）
//! - MIME类型覆盖表
//! - 路径处理工具（扩展名获取、请求路径解析）

pub mod headers;
pub mod mime;
pub mod path;
